//! Integration tests for bp-output.

use bp_core::{AdmissionMode, BargeId, PortConfig, TerminalId, Tick};
use bp_network::SailingMatrix;
use bp_sim::{BargeSummary, EventKind, EventRecord, Sim, SimBuilder, SimObserver};

fn triangle_sim() -> Sim {
    let matrix =
        SailingMatrix::from_rows(vec![vec![0, 5, 7], vec![5, 0, 4], vec![7, 4, 0]]).unwrap();
    let config = PortConfig { admission: AdmissionMode::Reserved, ..PortConfig::default() };
    let mut sim = SimBuilder::new(config, matrix).build().unwrap();
    sim.create_vessel(Tick(0), vec![TerminalId(1), TerminalId(2)], vec![20, 15]).unwrap();
    sim.create_vessel(Tick(2), vec![TerminalId(2)], vec![10]).unwrap();
    sim
}

fn summary(barge: u32, arrival: u64, waiting: u64, info: u8, wait: u8) -> BargeSummary {
    BargeSummary {
        barge:                    BargeId(barge),
        arrival:                  Tick(arrival),
        leave:                    Tick(arrival + 60),
        visited:                  vec![TerminalId(1)],
        expected_sojourn:         50,
        actual_sojourn:           60,
        waiting,
        handling:                 40,
        sailing:                  20 - waiting.min(20),
        expected_leave:           Tick(arrival + 50),
        leave_deviation:          -10,
        waiting_fraction:         waiting as f64 / 40.0,
        information_satisfaction: info,
        waiting_satisfaction:     wait,
        replans:                  0,
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvWriter, BARGE_HEADER, EVENT_HEADER};
    use crate::row::{BargeRow, EventRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("events.csv").exists());
        assert!(dir.path().join("barges.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, EVENT_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("barges.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, BARGE_HEADER);
    }

    #[test]
    fn port_level_event_leaves_terminal_blank() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let record = EventRecord {
            tick:     Tick(7),
            barge:    BargeId(3),
            terminal: None,
            kind:     EventKind::PortDeparture,
            expected: Some(Tick(4)),
        };
        w.write_event(&EventRow::from(&record)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "");
        assert_eq!(&rows[0][3], "port_departure");
        assert_eq!(&rows[0][5], "-3");
    }

    #[test]
    fn barge_row_joins_visited_terminals() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let mut s = summary(0, 0, 10, 5, 7);
        s.visited = vec![TerminalId(4), TerminalId(2)];
        w.write_barge(&BargeRow::from(&s)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("barges.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][3], "4;2");
        assert_eq!(&rows[0][10], "0.250");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn integration_csv() {
        use crate::observer::SimOutputObserver;

        let dir = tmp();
        let mut sim = triangle_sim();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("barges.csv")).unwrap();
        let barges: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(barges.len(), 2);

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let events: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(events.first().map(|r| r[3].to_owned()), Some("port_arrival".to_owned()));
        assert_eq!(events.iter().filter(|r| &r[3] == "port_departure").count(), 2);
    }
}

#[cfg(test)]
mod summary_tests {
    use super::*;
    use crate::{Descriptive, RunSummary};

    #[test]
    fn descriptive_statistics() {
        let mut d = Descriptive::default();
        for v in [2, 4, 4, 4, 5, 5, 7, 9] {
            d.push(v);
        }
        assert_eq!(d.count(), 8);
        assert!((d.mean() - 5.0).abs() < 1e-9);
        assert!((d.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
        assert_eq!((d.min(), d.max()), (Some(2), Some(9)));
    }

    #[test]
    fn empty_descriptive_is_zero() {
        let d = Descriptive::default();
        assert_eq!(d.mean(), 0.0);
        assert_eq!(d.std_dev(), 0.0);
        assert_eq!(d.min(), None);
    }

    #[test]
    fn histograms_count_scores() {
        let mut s = RunSummary::new();
        s.on_barge_left(&summary(0, 0, 0, 7, 7));
        s.on_barge_left(&summary(1, 0, 30, 4, 6));
        s.on_barge_left(&summary(2, 0, 30, 4, 1));
        assert_eq!(s.information, [0, 0, 0, 2, 0, 0, 1]);
        assert_eq!(s.waiting_scores, [1, 0, 0, 0, 0, 1, 1]);
        assert_eq!(s.waiting.count(), 3);
    }

    #[test]
    fn warmup_barges_only_count_as_traffic() {
        let mut s = RunSummary::with_warmup(Tick(100));
        s.on_barge_left(&summary(0, 50, 0, 7, 7));
        s.on_barge_left(&summary(1, 150, 0, 7, 7));
        assert_eq!(s.left, 2);
        assert_eq!(s.actual_sojourn.count(), 1);
        assert_eq!(s.information[6], 1);
    }

    #[test]
    fn run_summary_from_simulation() {
        let mut sim = triangle_sim();
        let mut s = RunSummary::new();
        sim.run(&mut s).unwrap();
        assert_eq!((s.entered, s.left, s.in_port()), (2, 2, 0));
        assert_eq!(s.final_tick, Some(sim.now()));
        assert_eq!(s.handling.count(), 2);
        assert_eq!(s.information.iter().sum::<u64>(), 2);
        assert!(s.to_string().contains("entered=2"));
    }
}
