/// Issues join aliases `t1`, `t2`, ... in allocation order.
///
/// Allocation is a pure step: the caller keeps the returned counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AliasCounter(u32);

impl AliasCounter {
    pub fn next(self) -> (AliasCounter, String) {
        let n = self.0 + 1;
        (AliasCounter(n), format!("t{n}"))
    }

    /// Number of aliases issued so far.
    pub fn issued(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::AliasCounter;

    #[test]
    fn test_sequence_starts_at_one() {
        let counter = AliasCounter::default();
        let (counter, first) = counter.next();
        let (counter, second) = counter.next();

        assert_eq!(first, "t1");
        assert_eq!(second, "t2");
        assert_eq!(counter.issued(), 2);
    }

    #[test]
    fn test_next_does_not_mutate_receiver() {
        let counter = AliasCounter::default();
        let (_, a) = counter.next();
        let (_, b) = counter.next();
        assert_eq!(a, b);
        assert_eq!(counter.issued(), 0);
    }
}
