/// Operand stack. `N` is the capacity reserved up front; the stack grows past
/// it if a program needs more.
pub struct Stack<T, const N: usize> {
    data: Vec<T>,
}

impl<T, const N: usize> Stack<T, N> {
    pub fn new() -> Self {
        Stack {
            data: Vec::with_capacity(N),
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Returns `None` on underflow.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T, const N: usize> Default for Stack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_order() {
        let mut stack: Stack<i32, 4> = Stack::new();

        stack.push(1);
        stack.push(2);

        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn grows_past_reserved_capacity() {
        let mut stack: Stack<usize, 2> = Stack::new();

        for i in 0..10 {
            stack.push(i);
        }

        assert_eq!(stack.len(), 10);
    }
}
