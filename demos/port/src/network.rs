//! Sailing times of a small inland port: the entrance plus six terminals.

use std::io::Cursor;

use bp_network::{load_matrix_reader, NetworkResult, SailingMatrix};

/// Minutes between stops.  Row/column 0 is the port entrance.  Terminals
/// 1-3 sit on the north bank, 4-6 on the south bank across the river.
const SAILING_CSV: &str = "\
0,12,18,25,20,28,34\n\
12,0,7,14,16,22,27\n\
18,7,0,8,19,17,23\n\
25,14,8,0,24,15,16\n\
20,16,19,24,0,9,15\n\
28,22,17,15,9,0,7\n\
34,27,23,16,15,7,0\n\
";

pub fn build_network() -> NetworkResult<SailingMatrix> {
    load_matrix_reader(Cursor::new(SAILING_CSV))
}
