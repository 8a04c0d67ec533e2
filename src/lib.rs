mod circular;
pub mod demo;

// 重新导出数据结构供外部使用
pub use circular::{CircularQueue, Drain, IntoIter, Item, Iter, Link};
