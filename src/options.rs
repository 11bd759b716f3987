/// Construction-time settings for a [`SkipList`](crate::SkipList).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub(crate) seed: Option<u64>,
    pub(crate) max_height: Option<usize>,
}

impl Options {
    /// Seed the coin instead of drawing entropy from the OS.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Stop promoting once a tower spans `max_height` levels. Towers are
    /// uncapped unless this is set.
    pub fn max_height(mut self, max_height: usize) -> Self {
        assert!(max_height > 0);
        self.max_height = Some(max_height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Options;

    #[test]
    fn test_default_is_uncapped() {
        let options = Options::default();
        assert_eq!(options.seed, None);
        assert_eq!(options.max_height, None);
    }

    #[test]
    fn test_builder() {
        let options = Options::default().seed(9).max_height(4);
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.max_height, Some(4));
    }

    #[test]
    #[should_panic]
    fn test_zero_max_height() {
        Options::default().max_height(0);
    }
}
