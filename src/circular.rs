//! 循环双向链表队列的实现
//!
//! 这个模块提供了一个不考虑线程安全的 FIFO 队列。队列头部同时充当链表的哨兵：
//! 队首节点的 prev 和队尾节点的 next 都指回哨兵，形成一个环。
//!
//! # 内存布局
//! ```text
//!   first                          last
//!     |                              |
//!     v                              v
//!  +-----+      +-----+      +-----+
//!  |     |----->|     |----->|     |-----> Sentinel
//!  | N1  |      | N2  |      | N3  |
//!  |     |<-----|     |<-----|     |
//!  +-----+      +-----+      +-----+
//!     |
//!     +-----> Sentinel
//! ```
//!
//! # 所有权设计
//! - 节点存放在 arena（`Vec`）中，链接只是槽位下标，不持有所有权
//! - 哨兵是显式的 `Link::Sentinel`，不与节点类型混用
//! - 出队后的槽位进入空闲列表，下次入队时复用
//! - 调用方通过 `Item` 把数据交给队列，出队时再拿回来

use std::fmt::{self, Display};
use std::iter::FusedIterator;

use derive_new::new;
use log::{debug, trace};

/// 指向节点或队列自身哨兵的链接
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Link {
    #[default]
    Sentinel,
    Slot(usize),
}

/// 未链接的节点。入队时所有权转移给队列，出队时交还调用方。
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Item<T> {
    pub data: T,
}

impl<T> Item<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
struct Node<T> {
    // None 表示空闲槽位
    val: Option<T>,
    #[new(default)]
    next: Link,
    #[new(default)]
    prev: Link,
}

#[derive(Debug, Clone, new)]
pub struct CircularQueue<T> {
    #[new(default)]
    slots: Vec<Node<T>>,
    // 空闲槽位下标
    #[new(default)]
    free: Vec<usize>,
    // 哨兵的 next
    #[new(default)]
    first: Link,
    // 哨兵的 prev
    #[new(default)]
    last: Link,
    #[new(default)]
    len: usize,
}

impl<T> Default for CircularQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CircularQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.first == Link::Sentinel
    }

    /// 队首链接，空队列时为 `Link::Sentinel`
    pub fn first(&self) -> Link {
        self.first
    }

    /// 队尾链接，空队列时为 `Link::Sentinel`
    pub fn last(&self) -> Link {
        self.last
    }

    /// 把节点追加到队尾
    pub fn enqueue(&mut self, item: Item<T>) {
        let mut node = Node::new(Some(item.data));
        node.prev = self.last;
        node.next = Link::Sentinel;

        let index = self.alloc(node);
        let old_last = self.last;
        // 空队列时 old_last 是哨兵，这里实际设置的是 first
        self.set_next(old_last, Link::Slot(index));
        self.last = Link::Slot(index);
        self.len += 1;

        trace!("enqueue slot={index} len={}", self.len);
    }

    /// 取出队首节点，队列为空时返回 None 且不做任何修改
    pub fn dequeue(&mut self) -> Option<Item<T>> {
        let Link::Slot(index) = self.first else {
            return None;
        };

        let node = &mut self.slots[index];
        let next = node.next;
        let val = node.val.take();
        node.next = Link::Sentinel;
        node.prev = Link::Sentinel;

        self.first = next;
        // 队列变空时 next 是哨兵，这里实际设置的是 last
        self.set_prev(next, Link::Sentinel);
        self.free.push(index);
        self.len -= 1;

        debug_assert!(val.is_some(), "linked slot {index} has no payload");
        trace!("dequeue slot={index} len={}", self.len);
        val.map(Item::new)
    }

    pub fn front(&self) -> Option<&T> {
        match self.first {
            Link::Slot(index) => self.slots[index].val.as_ref(),
            Link::Sentinel => None,
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            cursor: self.first,
            remaining: self.len,
        }
    }

    /// 反复出队直到队列为空。迭代器提前丢弃时，未取出的节点仍留在队列中。
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { queue: self }
    }

    /// 用 dequeue + enqueue 把所有节点按原顺序移到 `dst` 队尾，返回移动的数量
    pub fn transfer(&mut self, dst: &mut CircularQueue<T>) -> usize {
        let mut moved = 0;
        for item in self.drain() {
            dst.enqueue(item);
            moved += 1;
        }

        debug!("transferred {moved} items, destination len={}", dst.len);
        moved
    }

    pub fn clear(&mut self) {
        debug!("clear {} items", self.len);

        self.slots.clear();
        self.free.clear();
        self.first = Link::Sentinel;
        self.last = Link::Sentinel;
        self.len = 0;
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(index) => {
                debug_assert!(self.slots[index].val.is_none(), "free slot {index} is occupied");
                self.slots[index] = node;
                index
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        }
    }

    // 哨兵的 next/prev 就是 first/last
    fn set_next(&mut self, at: Link, to: Link) {
        match at {
            Link::Sentinel => self.first = to,
            Link::Slot(index) => self.slots[index].next = to,
        }
    }

    fn set_prev(&mut self, at: Link, to: Link) {
        match at {
            Link::Sentinel => self.last = to,
            Link::Slot(index) => self.slots[index].prev = to,
        }
    }
}

// 按内容比较，与槽位布局无关
impl<T: PartialEq> PartialEq for CircularQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularQueue<T> {}

impl<T: Display> Display for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CircularQueue [")?;

        let mut iter = self.iter().peekable();
        while let Some(val) = iter.next() {
            write!(f, "{}", val)?;
            if iter.peek().is_some() {
                write!(f, ", ")?;
            }
        }

        write!(f, "]")
    }
}

impl<T> FromIterator<T> for CircularQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for CircularQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for val in iter {
            self.enqueue(Item::new(val));
        }
    }
}

pub struct Iter<'a, T> {
    queue: &'a CircularQueue<T>,
    cursor: Link,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let Link::Slot(index) = self.cursor else {
            return None;
        };

        let queue = self.queue;
        let node = &queue.slots[index];
        self.cursor = node.next;
        self.remaining -= 1;
        node.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Drain<'a, T> {
    queue: &'a mut CircularQueue<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = Item<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

pub struct IntoIter<T>(CircularQueue<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.dequeue().map(Item::into_inner)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for CircularQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}
