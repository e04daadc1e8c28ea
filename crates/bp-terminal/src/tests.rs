//! Unit tests for bp-terminal.

use bp_core::{AdmissionMode, BargeId, MaxWait, SlackPolicy, TerminalId, Tick};

use crate::{
    Appointment, AppointmentBook, Decision, StartInterval, Terminal, TerminalState, WaitingProfile,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn appt(barge: u32, lst: u64, processing: u64) -> Appointment {
    Appointment::new(BargeId(barge), Tick(lst), Tick(lst), processing)
}

fn book_of(appts: &[Appointment]) -> AppointmentBook {
    let mut book = AppointmentBook::new();
    for a in appts {
        book.insert(*a);
    }
    book
}

/// Reserved terminal with barge 0 (LAT/LST 10, 20 ticks) at the head and
/// barge 1 (LAT 30, LST 40, 10 ticks) second.
fn reserved_pair() -> Terminal {
    let mut t = Terminal::new(TerminalId(1), AdmissionMode::Reserved);
    t.add_appointment(BargeId(0), Tick(10), Tick(10), 20);
    t.add_appointment(BargeId(1), Tick(30), Tick(40), 10);
    t
}

fn admit(barge: u32, start: u64, handling: u64) -> Decision {
    Decision::Admit { barge: BargeId(barge), start: Tick(start), handling }
}

// ── AppointmentBook ───────────────────────────────────────────────────────────

#[cfg(test)]
mod appointment_book {
    use super::*;

    #[test]
    fn appointment_derives_pst_and_edt() {
        let a = Appointment::new(BargeId(3), Tick(5), Tick(12), 30);
        assert_eq!(a.pst, Tick(12));
        assert_eq!(a.edt, Tick(42));
    }

    #[test]
    fn insert_keeps_lst_order() {
        let book = book_of(&[appt(0, 50, 1), appt(1, 10, 1), appt(2, 30, 1)]);
        let lsts: Vec<u64> = book.iter().map(|a| a.lst.0).collect();
        assert_eq!(lsts, vec![10, 30, 50]);
        assert!(book.is_sorted());
    }

    #[test]
    fn equal_lst_goes_in_front() {
        let mut book = book_of(&[appt(0, 20, 1), appt(1, 20, 1)]);
        let pos = book.insert(appt(2, 20, 1));
        assert_eq!(pos, 0);
        let order: Vec<BargeId> = book.iter().map(|a| a.barge).collect();
        assert_eq!(order, vec![BargeId(2), BargeId(1), BargeId(0)]);
    }

    #[test]
    fn remove_and_lookup() {
        let mut book = book_of(&[appt(0, 10, 1), appt(1, 20, 1)]);
        assert_eq!(book.head().unwrap().barge, BargeId(0));
        assert_eq!(book.second().unwrap().barge, BargeId(1));
        assert_eq!(book.position(BargeId(1)), Some(1));

        let removed = book.remove(BargeId(0)).unwrap();
        assert_eq!(removed.lst, Tick(10));
        assert_eq!(book.head().unwrap().barge, BargeId(1));
        assert!(book.remove(BargeId(0)).is_none());
        assert!(book.get(BargeId(0)).is_none());
        assert_eq!(book.len(), 1);
    }
}

// ── WaitingProfile ────────────────────────────────────────────────────────────

#[cfg(test)]
mod waiting_profile {
    use super::*;

    const NO_SLACK: SlackPolicy = SlackPolicy::Constant(0);

    #[test]
    fn empty_book_never_waits() {
        let p = WaitingProfile::build(&AppointmentBook::new(), 15, Tick(7), NO_SLACK);
        assert_eq!(p.intervals(), &[StartInterval { start: Tick(7), end: Tick::INFINITY }]);
        for t in [7, 8, 100, 10_000] {
            assert_eq!(p.max_waiting_time(Tick(t)), 0);
        }
    }

    #[test]
    fn single_appointment_gap() {
        // Booked barge occupies [10, 30).  A 5-tick barge can start in
        // [0, 5] or from 30 onwards.
        let book = book_of(&[appt(0, 10, 20)]);
        let p = WaitingProfile::build(&book, 5, Tick(0), NO_SLACK);
        assert_eq!(
            p.intervals(),
            &[
                StartInterval { start: Tick(0), end: Tick(5) },
                StartInterval { start: Tick(30), end: Tick::INFINITY },
            ]
        );
        assert_eq!(p.max_waiting_time(Tick(0)), 0);
        assert_eq!(p.max_waiting_time(Tick(3)), 0);
        assert_eq!(p.max_waiting_time(Tick(5)), 0);
        assert_eq!(p.max_waiting_time(Tick(6)), 24);
        assert_eq!(p.max_waiting_time(Tick(29)), 1);
        assert_eq!(p.max_waiting_time(Tick(30)), 0);
        assert_eq!(p.max_waiting_time(Tick(500)), 0);
    }

    #[test]
    fn two_appointments() {
        let book = book_of(&[appt(0, 10, 20), appt(1, 40, 10)]);
        let p = WaitingProfile::build(&book, 5, Tick(0), NO_SLACK);
        assert_eq!(p.intervals().len(), 3);
        assert_eq!(p.max_waiting_time(Tick(20)), 10);
        assert_eq!(p.max_waiting_time(Tick(33)), 0);
        assert_eq!(p.max_waiting_time(Tick(35)), 0);
        assert_eq!(p.max_waiting_time(Tick(36)), 14);
        assert_eq!(p.max_waiting_time(Tick(50)), 0);
    }

    #[test]
    fn first_interval_discarded_when_already_past() {
        let book = book_of(&[appt(0, 10, 20), appt(1, 40, 10)]);
        let p = WaitingProfile::build(&book, 5, Tick(12), NO_SLACK);
        assert_eq!(p.intervals()[0], StartInterval { start: Tick(30), end: Tick(35) });
        assert_eq!(p.entries()[0].time, Tick(12));
        assert_eq!(p.max_waiting_time(Tick(12)), 18);
    }

    #[test]
    fn handling_longer_than_lst_skips_interval() {
        let book = book_of(&[appt(0, 3, 10)]);
        let p = WaitingProfile::build(&book, 5, Tick(0), NO_SLACK);
        assert_eq!(p.intervals(), &[StartInterval { start: Tick(13), end: Tick::INFINITY }]);
        assert_eq!(p.max_waiting_time(Tick(0)), 13);
    }

    #[test]
    fn tail_clamped_when_nothing_else_fits() {
        // Neither gap fits and the last EDT is already in the past.
        let book = book_of(&[appt(0, 100, 50), appt(1, 110, 5)]);
        let p = WaitingProfile::build(&book, 10, Tick(120), NO_SLACK);
        assert_eq!(p.intervals(), &[StartInterval { start: Tick(120), end: Tick::INFINITY }]);
        assert_eq!(p.max_waiting_time(Tick(120)), 0);
        assert_eq!(p.max_waiting_time(Tick(200)), 0);
    }

    #[test]
    fn overdue_book_ignores_slack() {
        let book = book_of(&[appt(0, 100, 50), appt(1, 110, 5)]);
        let p = WaitingProfile::build(&book, 10, Tick(120), SlackPolicy::Constant(7));
        assert!(p.is_overrun());
        assert_eq!(p.max_waiting_time(Tick(120)), 0);
        assert_eq!(p.max_waiting_time(Tick(300)), 0);

        // Tail reaching `now` exactly is not clamped and keeps its slack.
        let p = WaitingProfile::build(&book, 10, Tick(115), SlackPolicy::Constant(7));
        assert!(!p.is_overrun());
        assert_eq!(p.intervals(), &[StartInterval { start: Tick(115), end: Tick::INFINITY }]);
        assert_eq!(p.max_waiting_time(Tick(115)), 7);
    }

    /// Five appointments every 10 ticks, 5 ticks each; raw wait at T6 is 9.
    fn five_book() -> AppointmentBook {
        book_of(&[appt(0, 10, 5), appt(1, 20, 5), appt(2, 30, 5), appt(3, 40, 5), appt(4, 50, 5)])
    }

    #[test]
    fn constant_slack_is_added() {
        let p = WaitingProfile::build(&five_book(), 5, Tick(0), SlackPolicy::Constant(3));
        assert_eq!(p.raw_waiting_time(Tick(6)), 9);
        assert_eq!(p.max_waiting_time(Tick(6)), 12);
        assert_eq!(p.max_waiting_time(Tick(15)), 3);
    }

    #[test]
    fn factor_slack_denominator_five_book_five_doubles_wait() {
        let p = WaitingProfile::build(&five_book(), 5, Tick(0), SlackPolicy::Factor { denominator: 5 });
        assert_eq!(p.book_len(), 5);
        let raw = p.raw_waiting_time(Tick(6));
        assert_eq!(raw, 9);
        assert_eq!(p.max_waiting_time(Tick(6)), raw + raw);
        assert_eq!(p.max_waiting_time(Tick(16)), 18);
    }

    #[test]
    fn boundary_is_always_zero() {
        let port = Terminal::new(TerminalId::PORT, AdmissionMode::Reserved);
        let p = port.waiting_profile(30, Tick(0), SlackPolicy::Constant(50));
        assert!(p.is_boundary());
        assert_eq!(p.max_waiting_time(Tick(0)), 0);
        assert_eq!(p.max_waiting_time(Tick(99)), 0);
    }
}

// ── Terminal: unreserved ──────────────────────────────────────────────────────

#[cfg(test)]
mod unreserved {
    use super::*;

    #[test]
    fn fifo_service() {
        let mut t = Terminal::new(TerminalId(2), AdmissionMode::Unreserved);
        assert_eq!(t.on_arrival(BargeId(0), 5, Tick(0)), vec![admit(0, 0, 5)]);
        assert_eq!(t.state(), TerminalState::Handling);

        assert!(t.on_arrival(BargeId(1), 8, Tick(1)).is_empty());
        assert!(t.on_arrival(BargeId(2), 8, Tick(2)).is_empty());
        assert_eq!(t.queue_len(), 2);

        assert_eq!(t.on_finish(BargeId(0), Tick(5)), vec![admit(1, 5, 8)]);
        assert_eq!(t.on_finish(BargeId(1), Tick(13)), vec![admit(2, 13, 8)]);
        assert!(t.on_finish(BargeId(2), Tick(21)).is_empty());
        assert_eq!(t.state(), TerminalState::Idle);
        assert_eq!(t.handling_count(), 0);
    }

    #[test]
    fn ignores_appointment_order() {
        let mut t = Terminal::new(TerminalId(2), AdmissionMode::Unreserved);
        t.add_appointment(BargeId(0), Tick(10), Tick(10), 5);
        t.add_appointment(BargeId(1), Tick(30), Tick(30), 5);
        assert_eq!(t.on_arrival(BargeId(1), 5, Tick(0)), vec![admit(1, 0, 5)]);
        assert!(t.on_arrival(BargeId(0), 5, Tick(2)).is_empty());
        assert_eq!(t.on_finish(BargeId(1), Tick(5)), vec![admit(0, 5, 5)]);
        assert_eq!(t.book().len(), 1);
    }
}

// ── Terminal: reserved ────────────────────────────────────────────────────────

#[cfg(test)]
mod reserved {
    use super::*;

    #[test]
    fn single_appointment_admitted() {
        let mut t = Terminal::new(TerminalId(1), AdmissionMode::Reserved);
        t.add_appointment(BargeId(4), Tick(10), Tick(12), 6);
        assert_eq!(t.on_arrival(BargeId(4), 6, Tick(50)), vec![admit(4, 50, 6)]);
    }

    #[test]
    fn head_on_time_admitted() {
        let mut t = reserved_pair();
        assert_eq!(t.on_arrival(BargeId(0), 20, Tick(10)), vec![admit(0, 10, 20)]);
        assert_eq!(t.handling_count(), 1);
    }

    #[test]
    fn late_head_admitted_when_second_unaffected() {
        let mut t = reserved_pair();
        // 15 + 20 = 35 <= second LST 40
        assert_eq!(t.on_arrival(BargeId(0), 20, Tick(15)), vec![admit(0, 15, 20)]);
    }

    #[test]
    fn late_head_rejected_when_second_would_slip() {
        let mut t = reserved_pair();
        // 25 + 20 = 45 > second LST 40
        let out = t.on_arrival(BargeId(0), 20, Tick(25));
        assert_eq!(out, vec![Decision::Reject { barge: BargeId(0) }]);
        assert_eq!(t.queue_len(), 0);
        assert!(t.book().get(BargeId(0)).is_none());
        assert_eq!(t.book().len(), 1);
        assert_eq!(t.state(), TerminalState::Idle);
    }

    #[test]
    fn rejection_lets_waiting_barge_in() {
        let mut t = reserved_pair();
        // Barge 1 arrives early and is held behind the head.
        assert!(t.on_arrival(BargeId(1), 10, Tick(5)).is_empty());
        // 5 + 10 = 15 > head LST 10 and head LAT 10 not yet passed.
        assert_eq!(t.queue_len(), 1);
        assert_eq!(t.state(), TerminalState::Idle);

        // The late head is rejected and the rescan lets barge 1 start.
        let out = t.on_arrival(BargeId(0), 20, Tick(25));
        assert_eq!(out, vec![Decision::Reject { barge: BargeId(0) }, admit(1, 25, 10)]);
    }

    #[test]
    fn non_head_fits_before_head() {
        let mut t = reserved_pair();
        assert_eq!(t.on_arrival(BargeId(1), 4, Tick(5)), vec![admit(1, 5, 4)]);
    }

    #[test]
    fn non_head_admitted_once_head_lat_passed() {
        let mut t = reserved_pair();
        assert_eq!(t.on_arrival(BargeId(1), 10, Tick(11)), vec![admit(1, 11, 10)]);
    }

    #[test]
    fn held_barge_admitted_after_head_finishes() {
        let mut t = reserved_pair();
        assert!(t.on_arrival(BargeId(1), 10, Tick(5)).is_empty());
        assert_eq!(t.on_arrival(BargeId(0), 20, Tick(8)), vec![admit(0, 8, 20)]);
        assert_eq!(t.on_finish(BargeId(0), Tick(28)), vec![admit(1, 28, 10)]);
        assert!(t.on_finish(BargeId(1), Tick(38)).is_empty());
        assert!(t.book().is_empty());
        assert_eq!(t.state(), TerminalState::Idle);
    }

    #[test]
    fn busy_terminal_only_queues() {
        let mut t = reserved_pair();
        t.on_arrival(BargeId(0), 20, Tick(10));
        assert!(t.on_arrival(BargeId(1), 10, Tick(12)).is_empty());
        assert_eq!(t.queue_len(), 1);
        assert!(t.on_admission_check(Tick(13)).is_empty());
    }

    #[test]
    fn admission_check_rescans_in_book_order() {
        let mut t = reserved_pair();
        assert!(t.on_arrival(BargeId(1), 10, Tick(5)).is_empty());
        // Nothing changed yet at T9.
        assert!(t.on_admission_check(Tick(9)).is_empty());
        // Head LAT 10 has passed at T11.
        assert_eq!(t.on_admission_check(Tick(11)), vec![admit(1, 11, 10)]);
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn arb_book() -> impl Strategy<Value = Vec<(u64, u64)>> {
        prop::collection::vec((0u64..200, 1u64..40), 0..7)
    }

    proptest! {
        #[test]
        fn book_stays_sorted(ops in prop::collection::vec((0u32..8, 0u64..100, any::<bool>()), 0..60)) {
            let mut book = AppointmentBook::new();
            for (barge, lst, insert) in ops {
                let id = BargeId(barge);
                if insert && book.get(id).is_none() {
                    book.insert(Appointment::new(id, Tick(lst), Tick(lst), 5));
                } else {
                    book.remove(id);
                }
                prop_assert!(book.is_sorted());
            }
        }

        #[test]
        fn planned_start_lands_in_a_start_interval(
            appts in arb_book(),
            handling in 1u64..40,
            now in 0u64..150,
        ) {
            let entries: Vec<Appointment> =
                appts.iter().enumerate().map(|(i, &(lst, p))| appt(i as u32, lst, p)).collect();
            let book = book_of(&entries);
            let p = WaitingProfile::build(&book, handling, Tick(now), SlackPolicy::Constant(0));

            prop_assert!(!p.intervals().is_empty());
            for w in p.intervals().windows(2) {
                prop_assert!(w[0].end <= w[1].start);
            }
            for t in now..now + 300 {
                let start = Tick(t) + p.max_waiting_time(Tick(t));
                prop_assert!(p.intervals().iter().any(|iv| iv.contains(start)));
            }
        }

        #[test]
        fn wait_non_increasing_between_steps(
            appts in arb_book(),
            handling in 1u64..40,
            now in 0u64..150,
        ) {
            let entries: Vec<Appointment> =
                appts.iter().enumerate().map(|(i, &(lst, p))| appt(i as u32, lst, p)).collect();
            let p = WaitingProfile::build(&book_of(&entries), handling, Tick(now), SlackPolicy::Constant(0));
            let steps: Vec<Tick> = p.entries().iter().map(|e| e.time).collect();
            for t in now..now + 300 {
                if steps.contains(&Tick(t)) || steps.contains(&Tick(t + 1)) {
                    continue;
                }
                prop_assert!(p.max_waiting_time(Tick(t + 1)) <= p.max_waiting_time(Tick(t)));
            }
        }
    }
}
