use dlx_cover::Matrix;

/// The exact cover example from
/// <https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X>: universe `{1..7}`
/// and sets `A = {1, 4, 7}`, `B = {1, 4}`, `C = {4, 5, 7}`, `D = {3, 5, 6}`,
/// `E = {2, 3, 6, 7}`, `F = {2, 7}`.
#[allow(dead_code)]
pub const WIKI_MATRIX: &str = "
A 1001001
B 1001000
C 0001101
D 0010110
E 0110011
F 0100001
";

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Return true if every column is covered by exactly one of the given rows,
/// each row being a list of column indices.
#[allow(dead_code)]
pub fn is_exact_cover(num_columns: usize, rows: &[&Vec<usize>]) -> bool {
    let mut covered = vec![0usize; num_columns];
    for row in rows {
        for column in row.iter() {
            covered[*column] += 1;
        }
    }

    covered.into_iter().all(|count| count == 1)
}

/// Decode a compact description of a small matrix: `num_rows` rows of
/// `num_columns` bits each, packed row after row into `code`.
#[allow(dead_code)]
pub fn decode_rows(code: u64, num_rows: usize, num_columns: usize) -> Vec<Vec<usize>> {
    (0..num_rows)
        .map(|row| {
            (0..num_columns)
                .filter(|column| code & (1 << (row * num_columns + column)) != 0)
                .collect()
        })
        .collect()
}

/// Every subset of row indices that forms an exact cover, found by trying
/// all subsets. Each subset is sorted ascending.
///
/// Empty rows never take part, since they cover no column and the search
/// never reaches them.
#[allow(dead_code)]
pub fn brute_force_covers(num_columns: usize, rows: &[Vec<usize>]) -> Vec<Vec<usize>> {
    (0u64..(1 << rows.len()))
        .filter_map(|subset| {
            let chosen: Vec<usize> = (0..rows.len())
                .filter(|row| subset & (1 << row) != 0)
                .collect();
            if chosen.iter().any(|row| rows[*row].is_empty()) {
                return None;
            }
            let chosen_rows: Vec<&Vec<usize>> = chosen.iter().map(|row| &rows[*row]).collect();

            if is_exact_cover(num_columns, &chosen_rows) {
                Some(chosen)
            } else {
                None
            }
        })
        .collect()
}

/// Build a matrix whose rows are identified by their input position.
#[allow(dead_code)]
pub fn indexed_matrix(num_columns: usize, rows: &[Vec<usize>]) -> Matrix<usize> {
    Matrix::with_column_count(num_columns, rows.iter().cloned().enumerate())
        .expect("rows are within range and duplicate free")
}
