//! Translation of the runtime's `open` flags into filesystem access.
//! The encoding is newlib's and combinations are not bit-orthogonal, so the
//! accepted set is a fixed table rather than a per-bit decode.

use bitflags::bitflags;

use crate::error::{SysError, SysResult};
use crate::fs::{Access, Disposition};

bitflags! {
    /// newlib `O_*` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        const WRONLY = 0x0001;
        const RDWR = 0x0002;
        const APPEND = 0x0008;
        const CREAT = 0x0200;
        const TRUNC = 0x0400;
        const BINARY = 0x1_0000;
    }
}

const RDONLY: u32 = 0;
const WRONLY: OpenFlags = OpenFlags::WRONLY;
const RDWR: OpenFlags = OpenFlags::RDWR;
const BINARY: OpenFlags = OpenFlags::BINARY;

const W: u32 = WRONLY.union(OpenFlags::CREAT).union(OpenFlags::TRUNC).bits();
const W_PLUS: u32 = RDWR.union(OpenFlags::CREAT).union(OpenFlags::TRUNC).bits();
const A: u32 = WRONLY.union(OpenFlags::APPEND).union(OpenFlags::CREAT).bits();
const A_PLUS: u32 = RDWR.union(OpenFlags::APPEND).union(OpenFlags::CREAT).bits();

const fn entry(raw: u32, read: bool, write: bool, disposition: Disposition) -> (u32, Access) {
    (raw, Access::new(read, write, disposition))
}

/// Every accepted raw value and what it opens as.
pub const FLAG_TABLE: [(u32, Access); 13] = [
    // "r", "rb"
    entry(RDONLY, true, false, Disposition::OpenExisting),
    entry(RDONLY | BINARY.bits(), true, false, Disposition::OpenExisting),
    // "r+", "rb+"
    entry(RDWR.bits(), true, true, Disposition::OpenExisting),
    entry(RDWR.bits() | BINARY.bits(), true, true, Disposition::OpenExisting),
    // "w+", "wb+"
    entry(W_PLUS, true, true, Disposition::CreateAlways),
    entry(W_PLUS | BINARY.bits(), true, true, Disposition::CreateAlways),
    // "w", "wb"
    entry(W, false, true, Disposition::CreateAlways),
    entry(W | BINARY.bits(), false, true, Disposition::CreateAlways),
    // "a", "ab"; bare O_CREAT is what older runtimes pass for "a"
    entry(OpenFlags::CREAT.bits(), false, true, Disposition::Append),
    entry(A, false, true, Disposition::Append),
    entry(A | BINARY.bits(), false, true, Disposition::Append),
    // "a+", "ab+"
    entry(A_PLUS, true, true, Disposition::Append),
    entry(A_PLUS | BINARY.bits(), true, true, Disposition::Append),
];

/// Looks up `raw` in the flag table. Anything not listed is `UnsupportedFlags`.
pub fn translate(raw: u32) -> SysResult<Access> {
    FLAG_TABLE
        .iter()
        .find(|(value, _)| *value == raw)
        .map(|(_, access)| *access)
        .ok_or(SysError::UnsupportedFlags)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(W, 1537);
        assert_eq!(W_PLUS, 1538);
        assert_eq!(A, 521);
        assert_eq!(A_PLUS, 522);
        assert_eq!(W | BINARY.bits(), 67073);
        assert_eq!(A_PLUS | BINARY.bits(), 66058);
    }

    #[test]
    fn test_translate_modes() {
        let r = translate(0).unwrap();
        assert!(r.read && !r.write);
        assert_eq!(r.disposition, Disposition::OpenExisting);

        let rb_plus = translate(65538).unwrap();
        assert!(rb_plus.read && rb_plus.write);
        assert_eq!(rb_plus.disposition, Disposition::OpenExisting);

        let w = translate(1537).unwrap();
        assert!(!w.read && w.write);
        assert_eq!(w.disposition, Disposition::CreateAlways);

        let wb_plus = translate(67074).unwrap();
        assert!(wb_plus.read && wb_plus.write);
        assert_eq!(wb_plus.disposition, Disposition::CreateAlways);

        for raw in [512, 521, 66057] {
            let a = translate(raw).unwrap();
            assert!(!a.read && a.write);
            assert_eq!(a.disposition, Disposition::Append);
        }

        let a_plus = translate(522).unwrap();
        assert!(a_plus.read && a_plus.write);
        assert_eq!(a_plus.disposition, Disposition::Append);
    }

    #[test]
    fn test_unknown_flags_rejected() {
        assert_eq!(translate(1), Err(SysError::UnsupportedFlags)); // O_WRONLY alone
        assert_eq!(translate(0x400), Err(SysError::UnsupportedFlags));
        assert_eq!(translate(u32::MAX), Err(SysError::UnsupportedFlags));
    }

    #[test]
    fn test_table_has_no_duplicates() {
        for (i, (a, _)) in FLAG_TABLE.iter().enumerate() {
            for (b, _) in &FLAG_TABLE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
