//! Blocking FIFO task queue.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::types::TaskSource;

/// A FIFO handoff between one producer and many consumers.
///
/// `capacity == 0` means unbounded. Each task is handed to exactly one
/// consumer.
pub struct TaskQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> TaskQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity,
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Maximum number of queued tasks, `0` for unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    fn is_full(&self, items: &VecDeque<T>) -> bool {
        self.capacity > 0 && items.len() >= self.capacity
    }

    /// Appends a task, blocking while the queue is full.
    pub fn put(&self, task: T) {
        let mut items = self.items.lock();
        while self.is_full(&items) {
            self.not_full.wait(&mut items);
        }
        items.push_back(task);
        self.not_empty.notify_one();
    }

    /// Appends a task, waiting at most `timeout` for room.
    ///
    /// Gives the task back if the queue stayed full.
    pub fn put_timeout(&self, task: T, timeout: Duration) -> Result<(), T> {
        let deadline = Instant::now() + timeout;
        let mut items = self.items.lock();
        while self.is_full(&items) {
            if self.not_full.wait_until(&mut items, deadline).timed_out() && self.is_full(&items) {
                return Err(task);
            }
        }
        items.push_back(task);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Appends a task without blocking; gives it back if full.
    pub fn try_put(&self, task: T) -> Result<(), T> {
        self.put_timeout(task, Duration::ZERO)
    }

    /// Removes the oldest task, waiting at most `timeout` for one.
    pub fn get(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut items = self.items.lock();
        loop {
            if let Some(task) = items.pop_front() {
                self.not_full.notify_one();
                return Some(task);
            }
            if self.not_empty.wait_until(&mut items, deadline).timed_out() {
                let task = items.pop_front();
                if task.is_some() {
                    self.not_full.notify_one();
                }
                return task;
            }
        }
    }
}

impl<T: Send> TaskSource<T> for TaskQueue<T> {
    fn next_task(&self, timeout: Duration) -> Option<T> {
        self.get(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = TaskQueue::unbounded();
        for i in 0..5 {
            queue.put(i);
        }
        let drained: Vec<i32> = (0..5)
            .map(|_| queue.get(Duration::from_millis(10)).unwrap())
            .collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_get_times_out_when_empty() {
        let queue: TaskQueue<u8> = TaskQueue::unbounded();
        let start = Instant::now();
        assert!(queue.get(Duration::from_millis(20)).is_none());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_bounded_try_put() {
        let queue = TaskQueue::new(2);
        assert!(queue.try_put(1).is_ok());
        assert!(queue.try_put(2).is_ok());
        assert_eq!(queue.try_put(3), Err(3));
        assert_eq!(queue.len(), 2);
        queue.get(Duration::from_millis(1));
        assert!(queue.try_put(3).is_ok());
    }

    #[test]
    fn test_put_blocks_until_room() {
        let queue = Arc::new(TaskQueue::new(1));
        queue.put(0);
        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.put(1))
        };
        thread::sleep(Duration::from_millis(20));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(Duration::from_millis(10)), Some(0));
        producer.join().unwrap();
        assert_eq!(queue.get(Duration::from_millis(100)), Some(1));
    }

    #[test]
    fn test_get_wakes_on_put() {
        let queue = Arc::new(TaskQueue::unbounded());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.get(Duration::from_secs(10)))
        };
        thread::sleep(Duration::from_millis(20));
        queue.put(42);
        assert_eq!(consumer.join().unwrap(), Some(42));
    }

    #[test]
    fn test_each_task_dequeued_once() {
        let queue = Arc::new(TaskQueue::new(8));
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(task) = queue.get(Duration::from_millis(100)) {
                        seen.push(task);
                    }
                    seen
                })
            })
            .collect();
        for i in 0..200 {
            queue.put(i);
        }
        let mut all = Vec::new();
        for consumer in consumers {
            all.extend(consumer.join().unwrap());
        }
        assert_eq!(all.len(), 200);
        let unique: HashSet<_> = all.into_iter().collect();
        assert_eq!(unique.len(), 200);
    }
}
