//! 队列转移演示
//!
//! 先把若干节点放入源队列，再只用 `dequeue` 和 `enqueue` 把它们逐个移到目标队列，
//! 最后依次取出目标队列并确认源队列已空。

use std::io::{self, Write};

use log::debug;

use crate::{CircularQueue, Item};

pub const DEMO_ITEMS: i32 = 3;

pub fn run<W: Write>(out: &mut W) -> io::Result<()> {
    let mut src = CircularQueue::with_capacity(DEMO_ITEMS as usize);
    let mut dst = CircularQueue::with_capacity(DEMO_ITEMS as usize);

    for i in 0..DEMO_ITEMS {
        src.enqueue(Item::new(i));
    }
    debug!("source populated: {src}");

    write!(out, "\nBuilding the destination queue ...\n\n")?;
    for item in src.drain() {
        writeln!(out, "Data is {}", item.data)?;
        dst.enqueue(item);
    }

    write!(out, "\nDestination queue ...\n\n")?;
    for item in dst.drain() {
        writeln!(out, "Destination data is {}", item.data)?;
    }

    write!(out, "\nSource queue ...\n\n")?;
    if src.dequeue().is_none() {
        write!(out, "Source queue is empty.\n\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = "
Building the destination queue ...

Data is 0
Data is 1
Data is 2

Destination queue ...

Destination data is 0
Destination data is 1
Destination data is 2

Source queue ...

Source queue is empty.

";

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_demo_output() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), EXPECTED);
    }

    #[test]
    fn test_demo_write_error_propagates() {
        let err = run(&mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
