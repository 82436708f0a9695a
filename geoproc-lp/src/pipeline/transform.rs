//! Per-sample transformation

use crate::models::{OptimizedView, Sample};

/// Derive the optimized view of a sample. Pure and total.
pub fn transform(sample: &Sample) -> OptimizedView {
    OptimizedView {
        compressed: true,
        accuracy: sample.accuracy,
        speed: sample.speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_echoes_accuracy_and_speed() {
        let sample = Sample {
            latitude: 40.7,
            longitude: -74.0,
            timestamp: 1,
            accuracy: 12.25,
            speed: 3.5,
            user_id: "u".to_string(),
        };

        let view = transform(&sample);
        assert!(view.compressed);
        assert_eq!(view.accuracy, 12.25);
        assert_eq!(view.speed, 3.5);
    }

    #[test]
    fn test_transform_defaults() {
        let sample = Sample {
            latitude: 0.0,
            longitude: 0.0,
            timestamp: 0,
            accuracy: 0.0,
            speed: 0.0,
            user_id: String::new(),
        };

        assert_eq!(
            transform(&sample),
            OptimizedView {
                compressed: true,
                accuracy: 0.0,
                speed: 0.0
            }
        );
    }
}
