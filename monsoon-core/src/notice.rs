//! Notices for recoverable fallbacks
//!
//! Some inputs cannot be used exactly as requested but still allow a well-defined result:
//! a cell-area grid on a different grid, or a missing 850 hPa level. The operations fall
//! back and report what happened through [`Diagnosed`], so callers can inspect or ignore
//! the fallback. Each notice is also logged through `tracing` when it is raised.

use serde::{Deserialize, Serialize};

/// A recoverable fallback taken while computing a result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// Cell areas were supplied but could not be used; cosine-latitude weights were used instead
    AreaWeightsRejected { reason: String },
    /// The requested pressure level was absent and the nearest level was used
    NearestLevelSubstituted { requested: f64, found: f64 },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::AreaWeightsRejected { reason } => write!(
                f,
                "Cell area weights not used ({}), defaulting to cosine weighted averaging",
                reason
            ),
            Notice::NearestLevelSubstituted { requested, found } => write!(
                f,
                "Level {} not found, using nearest level {}",
                requested, found
            ),
        }
    }
}

/// A computed value together with any fallbacks taken to produce it
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub notices: Vec<Notice>,
}

impl<T> Diagnosed<T> {
    /// A value produced without any fallback
    pub fn clean(value: T) -> Self {
        Self {
            value,
            notices: vec![],
        }
    }

    pub fn with_notices(value: T, notices: Vec<Notice>) -> Self {
        Self { value, notices }
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed {
            value: f(self.value),
            notices: self.notices,
        }
    }

    /// Chain a further fallible step, keeping the notices of both
    pub fn and_then<U, E>(
        self,
        f: impl FnOnce(T) -> Result<Diagnosed<U>, E>,
    ) -> Result<Diagnosed<U>, E> {
        let mut next = f(self.value)?;
        let mut notices = self.notices;
        notices.append(&mut next.notices);
        Ok(Diagnosed {
            value: next.value,
            notices,
        })
    }

    /// Move this value's notices into `sink` and return the bare value
    pub fn drain_into(self, sink: &mut Vec<Notice>) -> T {
        sink.extend(self.notices);
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<Notice>) {
        (self.value, self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_then_keeps_notices_in_order() {
        let first = Diagnosed::with_notices(
            1,
            vec![Notice::NearestLevelSubstituted {
                requested: 85000.0,
                found: 82500.0,
            }],
        );
        let chained: Result<Diagnosed<i32>, ()> = first.and_then(|x| {
            Ok(Diagnosed::with_notices(
                x + 1,
                vec![Notice::AreaWeightsRejected {
                    reason: "shape".to_string(),
                }],
            ))
        });
        let chained = chained.unwrap();
        assert_eq!(chained.value, 2);
        assert_eq!(chained.notices.len(), 2);
        assert!(matches!(
            chained.notices[0],
            Notice::NearestLevelSubstituted { .. }
        ));
    }

    #[test]
    fn drain_collects_notices() {
        let mut sink = vec![];
        let value = Diagnosed::with_notices(
            "u",
            vec![Notice::AreaWeightsRejected {
                reason: "coordinates".to_string(),
            }],
        )
        .drain_into(&mut sink);
        assert_eq!(value, "u");
        assert_eq!(sink.len(), 1);
        assert!(sink[0].to_string().contains("cosine weighted"));
    }
}
