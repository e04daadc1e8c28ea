//! Unit tests for bp-network.

use std::io::Cursor;

use bp_core::TerminalId;

use crate::{load_matrix_reader, NetworkError, SailingMatrix};

fn three() -> SailingMatrix {
    SailingMatrix::from_rows(vec![vec![0, 5, 7], vec![5, 0, 4], vec![7, 4, 0]]).unwrap()
}

#[cfg(test)]
mod matrix {
    use super::*;

    #[test]
    fn lookup_by_terminal() {
        let m = three();
        assert_eq!(m.len(), 3);
        assert_eq!(m.cost(TerminalId(0), TerminalId(2)), 7);
        assert_eq!(m.cost(TerminalId(2), TerminalId(1)), 4);
        assert_eq!(m.get(TerminalId(3), TerminalId(0)), None);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = SailingMatrix::from_rows(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, NetworkError::NotSquare { row: 1, got: 1, expected: 2 }));
    }

    #[test]
    fn restrict_keeps_given_order() {
        let m = three();
        let sub = m.restrict(&[TerminalId(0), TerminalId(2)]).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.cost_at(0, 1), 7);
        assert_eq!(sub.cost_at(1, 0), 7);

        let flipped = m.restrict(&[TerminalId(2), TerminalId(1)]).unwrap();
        assert_eq!(flipped.cost_at(0, 1), 4);
    }

    #[test]
    fn restrict_unknown_terminal() {
        let err = three().restrict(&[TerminalId(0), TerminalId(9)]).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownTerminal(TerminalId(9))));
    }

    #[test]
    fn empty_matrix_has_no_rows() {
        let m = SailingMatrix::from_rows(vec![]).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
    }

    #[test]
    #[should_panic]
    fn cost_at_out_of_range_panics() {
        three().cost_at(0, 3);
    }
}

#[cfg(test)]
mod loader {
    use super::*;

    #[test]
    fn loads_square_csv() {
        let src = "0, 5, 7\n5,0,4\n7,4,0\n";
        let m = load_matrix_reader(Cursor::new(src)).unwrap();
        assert_eq!(m, three());
    }

    #[test]
    fn rejects_non_numeric_cell() {
        let err = load_matrix_reader(Cursor::new("0,x\n1,0\n")).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn rejects_non_square() {
        let err = load_matrix_reader(Cursor::new("0,1,2\n1,0,2\n")).unwrap_err();
        assert!(matches!(err, NetworkError::NotSquare { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = crate::load_matrix_csv(std::path::Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
