use serde::Serialize;

use super::{DEFAULT_LAB, TBD};

/// The lab running the experiment and the lab's id for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabIntent {
    pub lab: Option<String>,
    pub experiment_id: Option<String>,
}

#[derive(Serialize)]
struct Projection<'a> {
    lab: &'a str,
    experiment_id: String,
}

impl LabIntent {
    pub fn lab(&self) -> &str {
        self.lab
            .as_deref()
            .unwrap_or(DEFAULT_LAB)
    }

    /// The fully qualified experiment id, `experiment.<lab>.<id>`.
    pub fn qualified_experiment_id(&self) -> String {
        format!(
            "experiment.{}.{}",
            self.lab()
                .to_lowercase(),
            self.experiment_id
                .as_deref()
                .unwrap_or(TBD)
        )
    }
}

impl Serialize for LabIntent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Projection {
            lab: self.lab(),
            experiment_id: self.qualified_experiment_id(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let intent = LabIntent::default();
        assert_eq!(intent.lab(), "tacc");
        assert_eq!(intent.qualified_experiment_id(), "experiment.tacc.TBD");
    }

    #[test]
    fn lab_is_lowercased_in_id() {
        let intent = LabIntent {
            lab: Some("Ginkgo".to_string()),
            experiment_id: Some("abc".to_string()),
        };
        assert_eq!(intent.lab(), "Ginkgo");
        assert_eq!(intent.qualified_experiment_id(), "experiment.ginkgo.abc");
    }
}
