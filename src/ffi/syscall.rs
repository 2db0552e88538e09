use std::io::{Error, Result};
use std::os::fd::RawFd;

use super::Attr;

pub fn perf_event_open(attr: &Attr, pid: i32, cpu: i32, group_fd: RawFd, flags: u64) -> Result<RawFd> {
    let num = libc::SYS_perf_event_open;
    let fd = unsafe { libc::syscall(num, attr as *const Attr, pid, cpu, group_fd, flags) };
    if fd != -1 {
        Ok(fd as _)
    } else {
        Err(Error::last_os_error())
    }
}

pub fn ioctl(fd: RawFd, op: u64) -> Result<i32> {
    let result = unsafe { libc::ioctl(fd, op as _, 0) };
    if result != -1 {
        Ok(result)
    } else {
        Err(Error::last_os_error())
    }
}

pub fn ioctl_argp<T>(fd: RawFd, op: u64, argp: &mut T) -> Result<i32> {
    let result = unsafe { libc::ioctl(fd, op as _, argp as *mut T) };
    if result != -1 {
        Ok(result)
    } else {
        Err(Error::last_os_error())
    }
}

pub fn read(fd: RawFd, buf: &mut [u8]) -> Result<usize> {
    let count = buf.len();
    let buf = buf.as_mut_ptr() as _;
    let bytes = unsafe { libc::read(fd, buf, count) };
    if bytes != -1 {
        Ok(bytes as _)
    } else {
        Err(Error::last_os_error())
    }
}

pub fn close(fd: RawFd) -> Result<()> {
    let result = unsafe { libc::close(fd) };
    if result != -1 {
        Ok(())
    } else {
        Err(Error::last_os_error())
    }
}
