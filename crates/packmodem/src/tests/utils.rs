use crate::{MsgpackReader, MsgpackWriter, Result};

/// Runs `write` against a fresh writer and returns everything it emitted.
pub(crate) fn encode<F>(write: F) -> Vec<u8>
where
    F: FnOnce(&mut MsgpackWriter<Vec<u8>>) -> Result<()>,
{
    let mut writer = MsgpackWriter::new(Vec::new(), true, true);
    write(&mut writer).expect("write failed");
    writer.into_inner()
}

pub(crate) fn reader(bytes: &[u8]) -> MsgpackReader<&[u8]> {
    MsgpackReader::new(bytes, false)
}

/// Test-count for property tests, larger on CI.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
