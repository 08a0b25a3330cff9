//! Configuration loading tests.

use crate::in_memory::helpers::Host;
use eyre::{Result, ensure};
use rstest::rstest;
use taskboard::config::{ReorderConfig, ReorderConfigError};

#[rstest]
fn partial_json_falls_back_to_defaults() -> Result<()> {
    let config: ReorderConfig = serde_json::from_str(r#"{ "move_timeout_ms": 2500 }"#)?;

    ensure!(config.move_timeout_ms == 2500);
    ensure!(config.position_spacing == ReorderConfig::default().position_spacing);
    ensure!(config.validate().is_ok());
    Ok(())
}

#[rstest]
#[case::tiny_spacing(r#"{ "position_spacing": 1 }"#, ReorderConfigError::SpacingTooSmall(1))]
#[case::zero_spacing(r#"{ "position_spacing": 0 }"#, ReorderConfigError::SpacingTooSmall(0))]
#[case::zero_threshold(r#"{ "drag_threshold": 0 }"#, ReorderConfigError::ZeroDragThreshold)]
#[case::zero_timeout(r#"{ "move_timeout_ms": 0 }"#, ReorderConfigError::ZeroMoveTimeout)]
fn out_of_range_values_fail_validation(
    #[case] raw: &str,
    #[case] expected: ReorderConfigError,
) -> Result<()> {
    let config: ReorderConfig = serde_json::from_str(raw)?;
    ensure!(config.validate() == Err(expected));
    Ok(())
}

#[rstest]
fn host_refuses_zero_spacing_before_any_write() -> Result<()> {
    let config: ReorderConfig = serde_json::from_str(r#"{ "position_spacing": 0 }"#)?;

    let result = Host::with_config(config);

    ensure!(result.is_err_and(|err| {
        err.downcast_ref::<ReorderConfigError>() == Some(&ReorderConfigError::SpacingTooSmall(0))
    }));
    Ok(())
}
