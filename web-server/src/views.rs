//! HTML pages for the browser form

use dr_scoring_core::constants::{
    AGE_RANGE, APP_NAME, CHOLESTEROL_RANGE, DIASTOLIC_BP_RANGE, SYSTOLIC_BP_RANGE,
};
use dr_scoring_core::{Label, PredictionResult};

use crate::models::VitalsForm;

const STYLE: &str = r#"
body { font-family: 'Helvetica Neue', sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
h1 { color: #2c3e50; }
.row { display: flex; gap: 1rem; }
.row > div { flex: 1; }
label { display: block; margin-top: .75rem; }
input { width: 100%; padding: .4rem; }
button { margin-top: 1rem; background-color: #4CAF50; color: white; border: 0; border-radius: 8px; padding: 10px; font-weight: bold; }
.derived { padding: 10px; background-color: #f0f0f5; border-radius: 10px; margin-top: 10px; }
.present { color: #a94442; }
.absent { color: #2e7d32; }
.error { color: #a94442; border: 1px solid #a94442; border-radius: 8px; padding: 10px; }
progress { width: 100%; }
"#;

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<p>This app predicts whether a person shows signs of diabetic retinopathy based on input health features.</p>
{body}
{about}
<hr>
</body>
</html>
"#,
        title = APP_NAME,
        style = STYLE,
        body = body,
        about = about_section(),
    )
}

fn about_section() -> &'static str {
    r#"<details>
<summary>About this app</summary>
<ul>
<li><b>Purpose</b>: Predict Diabetic Retinopathy presence</li>
<li><b>Model</b>: Logistic Regression</li>
<li><b>Derived Features</b>: Pulse Pressure &amp; MAP</li>
</ul>
</details>"#
}

fn form_section(values: &VitalsForm) -> String {
    format!(
        r#"<form method="post" action="/predict">
<h2>Enter Patient Details</h2>
<div class="row">
<div>
<label for="age">Age</label>
<input id="age" name="age" type="number" step="1" min="{age_min}" max="{age_max}" value="{age}" required>
<label for="systolic_bp">Systolic Blood Pressure</label>
<input id="systolic_bp" name="systolic_bp" type="number" step="any" min="{sys_min}" max="{sys_max}" value="{sys}" required>
</div>
<div>
<label for="cholesterol">Cholesterol Level</label>
<input id="cholesterol" name="cholesterol" type="number" step="any" min="{chol_min}" max="{chol_max}" value="{chol}" required>
<label for="diastolic_bp">Diastolic Blood Pressure</label>
<input id="diastolic_bp" name="diastolic_bp" type="number" step="any" min="{dia_min}" max="{dia_max}" value="{dia}" required>
</div>
</div>
<button type="submit">Predict</button>
</form>"#,
        age_min = AGE_RANGE.0,
        age_max = AGE_RANGE.1,
        age = values.age,
        sys_min = SYSTOLIC_BP_RANGE.0,
        sys_max = SYSTOLIC_BP_RANGE.1,
        sys = values.systolic_bp,
        chol_min = CHOLESTEROL_RANGE.0,
        chol_max = CHOLESTEROL_RANGE.1,
        chol = values.cholesterol,
        dia_min = DIASTOLIC_BP_RANGE.0,
        dia_max = DIASTOLIC_BP_RANGE.1,
        dia = values.diastolic_bp,
    )
}

fn result_section(values: &VitalsForm, result: &PredictionResult) -> String {
    let class = match result.label {
        Label::Present => "present",
        Label::NoSigns => "absent",
    };

    format!(
        r#"<div class="derived">
<b>Pulse Pressure:</b> {pp:.2} mmHg<br>
<b>Mean Arterial Pressure:</b> {map:.2} mmHg
</div>
<h2>Prediction Result</h2>
<p class="{class}">{summary}</p>
<p>Model Confidence:</p>
<progress value="{confidence:.2}" max="1">{confidence:.2}</progress>
<p><a href="/report?{query}" download>Download Report</a></p>"#,
        pp = result.derived.pulse_pressure,
        map = result.derived.mean_arterial_pressure,
        class = class,
        summary = escape(&result.summary()),
        confidence = result.confidence,
        query = escape(&values.to_query()),
    )
}

/// Empty form with the default values
pub fn form_page(values: &VitalsForm) -> String {
    layout(&form_section(values))
}

/// Form, kept filled in, followed by the prediction
pub fn result_page(values: &VitalsForm, result: &PredictionResult) -> String {
    let body = format!("{}\n{}", form_section(values), result_section(values, result));
    layout(&body)
}

/// Form followed by a blocking failure message
pub fn error_page(values: &VitalsForm, message: &str) -> String {
    let body = format!(
        "{}\n<p class=\"error\">{}</p>",
        form_section(values),
        escape(message)
    );
    layout(&body)
}
