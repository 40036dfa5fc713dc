// Shared helpers for the integration tests.

/// Looks up the value of the sample whose line starts with `name{` and
/// contains every `label="value"` pair. Handy for asserting on `render()`.
pub fn sample_value(exposition: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    let prefix = format!("{}{{", name);
    exposition
        .lines()
        .filter(|line| line.starts_with(&prefix))
        .find(|line| {
            labels
                .iter()
                .all(|(k, v)| line.contains(&format!("{}=\"{}\"", k, v)))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}
