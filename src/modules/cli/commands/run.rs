//! Run command implementation

use calconnect_config::load_settings;
use calconnect_core::CalconnectError;
use calconnect_runtime::Runtime;
use clap::Args;
use tracing::{info, warn};

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Override server port (takes precedence over PORT)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,
}

impl RunCommand {
    /// Execute the run command
    pub async fn execute(&self, env_file: Option<&str>) -> Result<(), CalconnectError> {
        info!(
            "Loading environment from: {}",
            env_file.unwrap_or(".env (if present)")
        );

        let settings = load_settings(env_file)?.with_port_override(self.port);

        if !settings.has_api_key() {
            warn!("COMPOSIO_API_KEY is not set; platform calls will be rejected upstream");
        }

        let runtime = Runtime::new(settings)?;
        runtime.run().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_args() {
        let cmd = RunCommand { port: Some(8080) };
        assert_eq!(cmd.port, Some(8080));
    }

    #[tokio::test]
    async fn test_missing_env_file_fails_before_binding() {
        let cmd = RunCommand { port: None };
        let err = cmd
            .execute(Some("/nonexistent/calconnect.env"))
            .await
            .unwrap_err();
        assert!(matches!(err, CalconnectError::Config(_)));
    }
}
