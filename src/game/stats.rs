/// Collect statistics about the current game
#[derive(Default, Clone, Debug, Eq, PartialEq)]
pub struct Stats {
    /// Game ticks performed since the game started
    pub ticks: usize,
    pub apples_eaten: usize,
    /// Number of times the snake crashed into itself
    pub resets: usize,
    /// Longest the snake has been
    pub max_len: usize,
}

impl Stats {
    pub fn record_len(&mut self, len: usize) {
        self.max_len = self.max_len.max(len);
    }

    /// What the length counter at the top of the screen shows
    pub fn length_label(len: usize) -> String {
        format!("Length: {}", len)
    }

    pub fn get_stats_message(&self, len: usize) -> String {
        format!(
            "{}\nticks: {}\napples eaten: {}\nresets: {}\nlongest: {}",
            Self::length_label(len),
            self.ticks,
            self.apples_eaten,
            self.resets,
            self.max_len,
        )
    }
}
