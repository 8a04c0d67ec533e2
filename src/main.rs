use std::io::{self, Write};

use list_transfer::demo;

fn main() {
    // 日志走 stderr，不和 stdout 上的演示输出混在一起
    env_logger::init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = demo::run(&mut out).and_then(|()| out.flush()) {
        log::error!("failed to write demo output: {err}");
    }
}
