text_enum! {
    /// `score` orders by judges' aggregate, `popularity` by engagement.
    pub enum RankingMode {
        Score => "score",
        Popularity => "popularity",
    }
}

impl Default for RankingMode {
    fn default() -> Self {
        RankingMode::Score
    }
}
