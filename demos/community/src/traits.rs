use common::{Error, Result};

/// Personality of a community member, every trait lies in `[0, 1]`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Traits {
    pub(crate) openness: f64,
    pub(crate) conscientiousness: f64,
    pub(crate) extraversion: f64,
    pub(crate) agreeableness: f64,
    pub(crate) stability: f64,
}

impl Traits {
    pub(crate) fn new(
        openness: f64,
        conscientiousness: f64,
        extraversion: f64,
        agreeableness: f64,
        stability: f64,
    ) -> Result<Self> {
        let traits = Self {
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            stability,
        };
        for (name, v) in traits.named() {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::invalid(name, format!("{v} is outside of [0, 1]")));
            }
        }

        Ok(traits)
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("openness", self.openness),
            ("conscientiousness", self.conscientiousness),
            ("extraversion", self.extraversion),
            ("agreeableness", self.agreeableness),
            ("stability", self.stability),
        ]
    }
}
