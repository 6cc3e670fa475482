//! Plain-text prediction report offered for download

use crate::scorer::PredictionResult;

pub use crate::constants::REPORT_FILE_NAME;

/// Four-line report, each line newline terminated
pub fn format_report(result: &PredictionResult) -> String {
    format!(
        "Prediction: {}\nConfidence: {:.2}\nPulse Pressure: {:.2}\nMean Arterial Pressure: {:.2}\n",
        result.label.report_text(),
        result.confidence,
        result.derived.pulse_pressure,
        result.derived.mean_arterial_pressure,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;
    use crate::vitals::RawVitals;

    #[test]
    fn test_report_present() {
        let result = PredictionResult {
            label: Label::Present,
            confidence: 0.7,
            derived: RawVitals::default().derive(),
        };

        let report = format_report(&result);
        assert_eq!(
            report,
            "Prediction: DR Present\nConfidence: 0.70\nPulse Pressure: 40.00\nMean Arterial Pressure: 93.33\n"
        );
    }

    #[test]
    fn test_report_no_dr() {
        let result = PredictionResult {
            label: Label::NoSigns,
            confidence: 0.655,
            derived: RawVitals::new(30, 70.0, 60.0, 70.0).derive(),
        };

        let report = format_report(&result);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Prediction: No DR");
        assert!(lines[1].starts_with("Confidence: 0.6"));
        assert_eq!(lines[2], "Pulse Pressure: 10.00");
        assert_eq!(lines[3], "Mean Arterial Pressure: 63.33");
    }

    #[test]
    fn test_report_negative_pulse_pressure() {
        let result = PredictionResult {
            label: Label::NoSigns,
            confidence: 0.5,
            derived: RawVitals::new(30, 70.0, 100.0, 70.0).derive(),
        };

        assert!(format_report(&result).contains("Pulse Pressure: -30.00\n"));
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(REPORT_FILE_NAME, "dr_prediction_report.txt");
    }
}
