mod common;

use common::fresh_syscalls;
use pibridge::*;

const R: u32 = 0;
const R_PLUS: u32 = 2;
const W: u32 = 1537;
const W_PLUS: u32 = 1538;
const A: u32 = 521;

#[test]
fn test_descriptor_capacity() {
    let (_, mut sys) = fresh_syscalls();
    let mut fds = Vec::new();
    for i in 0..MAX_OPEN_FILES {
        let fd = sys.open(&format!("/f{}", i), W, 0o644).unwrap();
        assert_eq!(fd, (i + CONSOLE_FDS) as i32);
        fds.push(fd);
    }
    assert_eq!(sys.open("/one_too_many", W, 0o644), Err(SysError::TooManyOpenFiles));
    assert_eq!(sys.files().open_count(), MAX_OPEN_FILES);

    sys.close(fds[4]).unwrap();
    // The rejected open created nothing, and a failed open leaves the slot free
    assert_eq!(sys.open("/one_too_many", R, 0), Err(SysError::Io));
    assert_eq!(sys.open("/again", W, 0o644), Ok(fds[4]));
}

#[test]
fn test_close_bad_descriptors() {
    let (_, mut sys) = fresh_syscalls();
    for fd in [0, 1, 2, 3, 22, 23, -1, 1000] {
        assert_eq!(sys.close(fd), Err(SysError::BadDescriptor));
    }
    let fd = sys.open("/x", W, 0).unwrap();
    sys.close(fd).unwrap();
    assert_eq!(sys.close(fd), Err(SysError::BadDescriptor));
}

#[test]
fn test_console_input_unsupported() {
    let (_, mut sys) = fresh_syscalls();
    let mut buf = [0u8; 4];
    for fd in 0..3 {
        assert_eq!(sys.read(fd, &mut buf), Err(SysError::BadDescriptor));
    }
    assert_eq!(sys.read(7, &mut buf), Err(SysError::BadDescriptor));
    assert_eq!(sys.write(7, b"x"), Err(SysError::BadDescriptor));
}

#[test]
fn test_round_trip_through_lseek() {
    let (_, mut sys) = fresh_syscalls();
    let fd = sys.open("/rt.txt", W_PLUS, 0o644).unwrap();
    assert_eq!(sys.write(fd, b"round trip"), Ok(10));
    assert_eq!(sys.lseek(fd, 0, SEEK_SET), Ok(0));
    let mut buf = [0u8; 32];
    let n = sys.read(fd, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"round trip");
}

#[test]
fn test_create_truncate_reopen_read() {
    let (_, mut sys) = fresh_syscalls();
    let data: Vec<u8> = (0..100u8).collect();

    let fd = sys.open("/hundred", W, 0o644).unwrap();
    assert_eq!(sys.write(fd, &data), Ok(100));
    sys.close(fd).unwrap();

    let fd = sys.open("/hundred", R, 0).unwrap();
    let mut buf = [0u8; 200];
    assert_eq!(sys.read(fd, &mut buf), Ok(100));
    assert_eq!(&buf[..100], &data[..]);
    assert_eq!(sys.read(fd, &mut buf), Ok(0));
    sys.close(fd).unwrap();

    // "w" again truncates
    let fd = sys.open("/hundred", W, 0o644).unwrap();
    sys.close(fd).unwrap();
    let fd = sys.open("/hundred", R, 0).unwrap();
    assert_eq!(sys.read(fd, &mut buf), Ok(0));
}

#[test]
fn test_append_mode() {
    let (_, mut sys) = fresh_syscalls();
    let fd = sys.open("/log.txt", A, 0o644).unwrap();
    sys.write(fd, b"one ").unwrap();
    sys.close(fd).unwrap();
    let fd = sys.open("/log.txt", A, 0o644).unwrap();
    sys.write(fd, b"two").unwrap();
    sys.close(fd).unwrap();

    let fd = sys.open("/log.txt", R, 0).unwrap();
    let mut buf = [0u8; 16];
    let n = sys.read(fd, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"one two");
}

#[test]
fn test_open_errors() {
    let (_, mut sys) = fresh_syscalls();
    assert_eq!(sys.open("/missing", R, 0), Err(SysError::Io));
    assert_eq!(sys.open("/missing", R_PLUS, 0), Err(SysError::Io));
    assert_eq!(sys.open("/x", 0x1, 0), Err(SysError::UnsupportedFlags));
    assert_eq!(sys.open("/x", 0x400, 0), Err(SysError::UnsupportedFlags));
    assert_eq!(sys.files().open_count(), 0);
}

#[test]
fn test_read_only_descriptor_rejects_writes() {
    let (_, mut sys) = fresh_syscalls();
    let fd = sys.open("/ro", W, 0).unwrap();
    sys.close(fd).unwrap();
    let fd = sys.open("/ro", R, 0).unwrap();
    assert_eq!(sys.write(fd, b"x"), Err(SysError::BadDescriptor));
}

#[test]
fn test_lseek_from_end_always_fails() {
    let (_, mut sys) = fresh_syscalls();
    assert_eq!(sys.lseek(0, 0, SEEK_END), Err(SysError::InvalidArgument));
    assert_eq!(sys.lseek(9, 0, SEEK_END), Err(SysError::InvalidArgument));
    let fd = sys.open("/end", W_PLUS, 0).unwrap();
    assert_eq!(sys.lseek(fd, 0, SEEK_END), Err(SysError::InvalidArgument));
    assert_eq!(sys.lseek(fd, 0, 7), Err(SysError::InvalidArgument));
}

#[test]
fn test_lseek_bad_descriptors() {
    let (_, mut sys) = fresh_syscalls();
    assert_eq!(sys.lseek(1, 0, SEEK_SET), Err(SysError::BadDescriptor));
    assert_eq!(sys.lseek(3, 0, SEEK_SET), Err(SysError::BadDescriptor));
}

#[test]
fn test_lseek_walks_clusters() {
    let (_, mut sys) = fresh_syscalls();
    let bpc = sys.fs().bytes_per_cluster();
    let data: Vec<u8> = (0..5 * bpc as usize).map(|i| (i % 253) as u8).collect();
    let fd = sys.open("/walk", W_PLUS, 0).unwrap();
    sys.write(fd, &data).unwrap();

    // Exactly on a cluster boundary
    assert_eq!(sys.lseek(fd, 2 * bpc as i64, SEEK_SET), Ok(2 * bpc));
    let mut byte = [0u8; 1];
    sys.read(fd, &mut byte).unwrap();
    assert_eq!(byte[0], data[2 * bpc as usize]);

    // Relative, backwards across a cluster
    let pos = 2 * bpc + 1;
    assert_eq!(sys.lseek(fd, -10, SEEK_CUR), Ok(pos - 10));
    sys.read(fd, &mut byte).unwrap();
    assert_eq!(byte[0], data[(pos - 10) as usize]);

    assert_eq!(sys.lseek(fd, -1_000_000, SEEK_CUR), Err(SysError::InvalidArgument));
}

#[test]
fn test_lseek_clamps_read_only() {
    let (_, mut sys) = fresh_syscalls();
    let fd = sys.open("/small", W, 0).unwrap();
    sys.write(fd, &[1u8; 100]).unwrap();
    sys.close(fd).unwrap();

    let fd = sys.open("/small", R, 0).unwrap();
    assert_eq!(sys.lseek(fd, 100_000, SEEK_SET), Ok(100));
    let mut buf = [0u8; 4];
    assert_eq!(sys.read(fd, &mut buf), Ok(0));
}

#[test]
fn test_write_past_end_leaves_hole() {
    let (_, mut sys) = fresh_syscalls();
    let fd = sys.open("/hole", W_PLUS, 0).unwrap();
    assert_eq!(sys.lseek(fd, 5000, SEEK_SET), Ok(5000));
    sys.write(fd, b"end").unwrap();
    assert_eq!(sys.lseek(fd, 0, SEEK_SET), Ok(0));
    let mut buf = vec![0xFFu8; 5003];
    assert_eq!(sys.read(fd, &mut buf), Ok(5003));
    assert!(buf[..5000].iter().all(|&b| b == 0));
    assert_eq!(&buf[5000..], b"end");
}

#[test]
fn test_close_failure_can_be_retried() {
    let (rd, mut sys) = fresh_syscalls();
    let fd = sys.open("/retry", W, 0).unwrap();
    sys.write(fd, b"payload").unwrap();

    rd.set_fail_writes(true);
    assert_eq!(sys.close(fd), Err(SysError::Io));
    assert!(sys.files().is_open(fd));

    rd.set_fail_writes(false);
    assert_eq!(sys.close(fd), Ok(()));
    assert!(!sys.files().is_open(fd));
}

#[test]
fn test_fstat_console() {
    let (_, sys) = fresh_syscalls();
    for fd in [1, 2] {
        let st = sys.fstat(fd).unwrap();
        assert_eq!(st.ino, fd as u32);
        assert_eq!(st.mode, S_IFCHR);
        assert_eq!(st.size, 1280 * 720 * 2);
        assert_eq!(st.blksize, 512);
        assert_eq!(st.blocks, 3600);
        assert_eq!((st.atime, st.mtime, st.ctime), (0, 0, 0));
    }
    assert_eq!(sys.fstat(0), Err(SysError::NotFound));
    assert_eq!(sys.fstat(3), Err(SysError::NotFound));
}

#[test]
fn test_console_writes_report_full_length() {
    let (_, mut sys) = fresh_syscalls();
    assert_eq!(sys.write(1, b"hello\n"), Ok(6));
    assert_eq!(sys.console().cursor(), (1, 0));
    assert_eq!(sys.write(2, &[0xFF; 3]), Ok(3));
    assert_eq!(sys.console().cursor(), (1, 3));
    assert_eq!(sys.write(0, b"x"), Ok(1));
    assert_eq!(sys.console().cursor(), (1, 4));
}

#[test]
fn test_unlinked_descriptor_cannot_reach_new_file() {
    let (_, mut sys) = fresh_syscalls();
    let fd_a = sys.open("/a", W_PLUS, 0).unwrap();
    sys.write(fd_a, b"AAAA").unwrap();
    sys.unlink("/a").unwrap();

    let fd_b = sys.open("/b", W_PLUS, 0).unwrap();
    sys.write(fd_b, b"bbbbbbbb").unwrap();

    assert_eq!(sys.write(fd_a, b"ZZ"), Err(SysError::Io));
    assert_eq!(sys.close(fd_a), Ok(()));

    sys.lseek(fd_b, 0, SEEK_SET).unwrap();
    let mut buf = [0u8; 16];
    let n = sys.read(fd_b, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"bbbbbbbb");
}

#[test]
fn test_unlink_and_rename() {
    let (_, mut sys) = fresh_syscalls();
    let fd = sys.open("/a", W, 0).unwrap();
    sys.close(fd).unwrap();

    sys.rename("/a", "/b").unwrap();
    assert_eq!(sys.open("/a", R, 0), Err(SysError::Io));
    assert_eq!(sys.rename("/a", "/c"), Err(SysError::NotFound));

    sys.unlink("/b").unwrap();
    assert_eq!(sys.unlink("/b"), Err(SysError::NotFound));
}

#[test]
fn test_sbrk() {
    let (_, mut sys) = fresh_syscalls();
    let first = sys.sbrk(0x100).unwrap();
    assert_eq!(first, common::HEAP.start);
    let second = sys.sbrk(0x200).unwrap();
    assert_eq!(second, first + 0x100);

    let top = sys.heap().top();
    assert_eq!(sys.sbrk(common::HEAP.ceiling), Err(SysError::OutOfMemory));
    assert_eq!(sys.heap().top(), top);
    assert_eq!(sys.sbrk(common::HEAP.ceiling - top), Ok(top));
    assert_eq!(sys.heap().remaining(), 0);
}

#[test]
fn test_process_stubs() {
    let (_, mut sys) = fresh_syscalls();
    assert_eq!(sys.getpid(), 1);
    assert_eq!(sys.link("/a", "/b"), Err(SysError::NotFound));
    assert!(sys.isatty(0) && sys.isatty(5));
    assert_eq!(sys.gettimeofday(), Ok((TimeVal { sec: 0, usec: 0 }, TimeZone::default())));
    assert_eq!(sys.kill(1, 9).unwrap_err().errno(), 22);
    assert_eq!(sys.fork().unwrap_err().errno(), 11);
    assert_eq!(sys.wait().unwrap_err().errno(), 10);
    assert_eq!(sys.execve("/bin/sh", &[], &[]).unwrap_err().errno(), 12);
    assert_eq!(sys.times(), Err(SysError::Unsupported));
}

#[test]
fn test_errno_values() {
    assert_eq!(SysError::BadDescriptor.errno(), 9);
    assert_eq!(SysError::TooManyOpenFiles.errno(), 24);
    assert_eq!(SysError::Io.errno(), 5);
    assert_eq!(SysError::InvalidArgument.errno(), 22);
    assert_eq!(SysError::NoSuchDrive.errno(), 19);
    assert_eq!(SysError::OutOfMemory.errno(), 12);
    assert_eq!(SysError::NotFound.errno(), 2);
}

#[test]
fn test_shared_syscalls() {
    let (_, sys) = fresh_syscalls();
    let shared: SharedSyscalls<_, _> = spin::Mutex::new(sys);
    let fd = shared.lock().open("/locked", W, 0).unwrap();
    assert_eq!(shared.lock().write(fd, b"x"), Ok(1));
    assert_eq!(shared.lock().close(fd), Ok(()));
}
