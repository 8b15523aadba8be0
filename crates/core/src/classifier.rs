//! Out-of-process classifier invocation.
//!
//! Runs the configured program once per request with the comma-joined feature vector as its last
//! argument and reads the label from standard output. The call is bounded by the configured
//! timeout; a child still running at the deadline is killed.

use crate::config::ClassifierSettings;
use crate::features::FeatureVector;
use crate::{PtbError, PtbResult};
use std::process::Stdio;
use tokio::process::Command;

#[derive(Clone, Debug)]
pub struct ExternalClassifier {
    settings: ClassifierSettings,
}

impl ExternalClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    /// Runs the classifier and returns its trimmed standard output.
    ///
    /// # Errors
    ///
    /// - [`PtbError::ExternalProcess`] if the program cannot be started, exits unsuccessfully,
    ///   writes anything to standard error, or prints nothing.
    /// - [`PtbError::ClassifierTimeout`] if it does not finish in time.
    pub async fn classify(&self, features: &FeatureVector) -> PtbResult<String> {
        let timeout = self.settings.timeout();
        let mut command = Command::new(self.settings.program());
        command
            .args(self.settings.args())
            .arg(features.to_arg_string())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(
            program = %self.settings.program().display(),
            "running external classifier"
        );

        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!("failed to execute external classifier: {}", e);
                PtbError::ExternalProcess(format!("failed to execute classifier: {}", e))
            })?,
            Err(_) => {
                tracing::error!("external classifier timed out after {:?}", timeout);
                return Err(PtbError::ClassifierTimeout(timeout));
            }
        };

        if !output.status.success() {
            tracing::error!("external classifier exited with {}", output.status);
            return Err(PtbError::ExternalProcess(format!(
                "classifier exited with {}",
                output.status
            )));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::error!("external classifier wrote to stderr: {}", stderr.trim());
            return Err(PtbError::ExternalProcess(format!(
                "stderr: {}",
                stderr.trim()
            )));
        }

        let label = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if label.is_empty() {
            return Err(PtbError::ExternalProcess(
                "classifier produced no output".into(),
            ));
        }

        Ok(label)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn features() -> FeatureVector {
        FeatureVector {
            age: 31.0,
            parity: 2.0,
            abortions: 0.0,
            weight: 70.2,
            hypertension: 0.0,
            diabetes: 1.0,
            placental_position: 1.0,
            bleeding_first_trimester: 0.0,
            bleeding_second_trimester: 0.0,
            funneling: 0.0,
            smoker: 0.0,
            root_mean_square: 0.01,
            median_frequency: 0.4,
            peak_frequency: 0.35,
            sample_entropy: 0.8,
        }
    }

    /// `sh -c <script> classifier <features>`: the feature string arrives as `$1`.
    fn shell(script: &str, timeout: Duration) -> ExternalClassifier {
        let settings = ClassifierSettings::new(
            "sh".into(),
            vec!["-c".into(), script.into(), "classifier".into()],
            timeout,
        )
        .unwrap();
        ExternalClassifier::new(settings)
    }

    #[tokio::test]
    async fn returns_trimmed_stdout() {
        let classifier = shell("printf '  Term\\n\\n'", Duration::from_secs(5));
        assert_eq!(classifier.classify(&features()).await.unwrap(), "Term");
    }

    #[tokio::test]
    async fn passes_comma_joined_features_as_last_argument() {
        let classifier = shell("echo \"$1\"", Duration::from_secs(5));
        let echoed = classifier.classify(&features()).await.unwrap();
        assert_eq!(echoed, features().to_arg_string());
        assert_eq!(echoed.split(',').count(), 15);
    }

    #[tokio::test]
    async fn non_zero_exit_is_external_process_error() {
        let classifier = shell("exit 3", Duration::from_secs(5));
        let err = classifier.classify(&features()).await.unwrap_err();
        assert!(matches!(err, PtbError::ExternalProcess(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn any_stderr_output_fails_the_call() {
        let classifier = shell("echo Term; echo 'warning: scaler' >&2", Duration::from_secs(5));
        let err = classifier.classify(&features()).await.unwrap_err();
        assert!(
            matches!(&err, PtbError::ExternalProcess(msg) if msg.contains("warning: scaler")),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn missing_program_is_external_process_error() {
        let settings = ClassifierSettings::new(
            "/nonexistent/ptb-classifier".into(),
            vec![],
            Duration::from_secs(5),
        )
        .unwrap();
        let err = ExternalClassifier::new(settings)
            .classify(&features())
            .await
            .unwrap_err();
        assert!(matches!(err, PtbError::ExternalProcess(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn empty_output_is_rejected() {
        let classifier = shell("true", Duration::from_secs(5));
        assert!(matches!(
            classifier.classify(&features()).await,
            Err(PtbError::ExternalProcess(_))
        ));
    }

    #[tokio::test]
    async fn slow_classifier_times_out() {
        let classifier = shell("sleep 5; echo Term", Duration::from_millis(100));
        let err = classifier.classify(&features()).await.unwrap_err();
        assert!(
            matches!(err, PtbError::ClassifierTimeout(d) if d == Duration::from_millis(100)),
            "got {err:?}"
        );
    }
}
