use serde::{Deserialize, Serialize};

/// One transcript sentence anchored to an explicit or synthesized time
/// marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Matched time expression, or a synthetic `event_<n>` placeholder when
    /// the sentence was promoted by an importance keyword instead.
    pub time_label: String,
    /// Source sentence truncated to 50 characters, ellipsized if cut.
    pub title: String,
    /// Full source sentence.
    pub description: String,
    /// Position among the segmented sentences. Unique per event.
    pub sequence_index: usize,
    pub has_explicit_time: bool,
}

/// One scatter point in the chart spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    /// `[event index, time label, description (≤100 chars), explicit/implicit marker]`.
    pub value: (usize, String, String, String),
    #[serde(rename = "pointSize")]
    pub point_size: u32,
}

/// Chart-ready representation of a timeline: a titled scatter layout with
/// one category and one point per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineChart {
    pub title: String,
    pub kind: String,
    pub categories: Vec<String>,
    pub points: Vec<ChartPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_point_serializes_value_as_array() {
        let point = ChartPoint {
            name: "standup".to_string(),
            value: (0, "10:30".to_string(), "standup at 10:30".to_string(), "explicit".to_string()),
            point_size: 10,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["value"][0], 0);
        assert_eq!(json["value"][1], "10:30");
        assert_eq!(json["pointSize"], 10);
    }

    #[test]
    fn chart_round_trips() {
        let chart = TimelineChart {
            title: "Meeting Timeline".to_string(),
            kind: "scatter".to_string(),
            categories: vec!["10:30".to_string()],
            points: vec![ChartPoint {
                name: "standup".to_string(),
                value: (0, "10:30".to_string(), "standup".to_string(), "explicit".to_string()),
                point_size: 10,
            }],
        };
        let json = serde_json::to_string(&chart).unwrap();
        let back: TimelineChart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chart);
    }
}
