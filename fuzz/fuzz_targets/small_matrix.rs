#![no_main]

use dlx_cover::{IntegrityChecks, Limit, Matrix, SearchOptions};
use libfuzzer_sys::fuzz_target;
use std::ops::ControlFlow;

const MAX_COLUMNS: usize = 12;
const MAX_ROWS: usize = 24;

#[derive(Debug)]
struct SmallMatrixInput {
    num_columns: usize,
    rows: Vec<u16>,
    limit: usize,
}

impl<'a> arbitrary::Arbitrary<'a> for SmallMatrixInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let num_columns = u.int_in_range(1..=MAX_COLUMNS)?;
        let num_rows = u.int_in_range(0..=MAX_ROWS)?;
        let rows = (0..num_rows)
            .map(|_| Ok(u.arbitrary::<u16>()? & ((1 << num_columns) - 1)))
            .collect::<arbitrary::Result<_>>()?;
        let limit = u.int_in_range(0..=8)?;

        Ok(SmallMatrixInput {
            num_columns,
            rows,
            limit,
        })
    }
}

fuzz_target!(|data: SmallMatrixInput| {
    let rows = data
        .rows
        .iter()
        .enumerate()
        .map(|(index, bits)| (index, u128::from(*bits)));
    let mut matrix = Matrix::from_bitmasks(data.num_columns, rows).unwrap();
    let options = SearchOptions::default().integrity_checks(IntegrityChecks::EveryBacktrack);

    // Every reported solution covers each column exactly once.
    let mut check = |chosen: &[&usize]| {
        let mut covered = 0u16;
        for row in chosen {
            let bits = data.rows[**row];
            assert_eq!(covered & bits, 0, "rows overlap in {chosen:?}");
            covered |= bits;
        }
        assert_eq!(covered, (1 << data.num_columns) - 1, "{chosen:?}");
        ControlFlow::Continue(())
    };
    matrix.solver().with_options(options).search(&mut check);

    // Stopping early leaves the matrix exactly as it was.
    matrix
        .solver()
        .with_options(options)
        .search(&mut Limit::new(&mut check, data.limit));
    matrix.verify().unwrap();
});
