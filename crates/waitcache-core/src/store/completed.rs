/// Rides marked as done today, kept in the order they were completed.
///
/// Lives in memory only; a restart starts the day over.
#[derive(Debug, Clone, Default)]
pub struct CompletedRides {
    names: Vec<String>,
}

impl CompletedRides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a ride completed. Returns false if it already was.
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            false
        } else {
            self.names.push(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }
}
