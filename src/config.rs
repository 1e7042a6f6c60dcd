//! Configuration for the turtle controller node

use crate::error::{ControllerError, Result};
use std::collections::HashMap;
use std::time::Duration;

/// Name of the parameter holding the seconds between control ticks
pub const LOOP_FREQUENCY_PARAM: &str = "loop_frequency";

/// Node configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub node_name: String,
    /// Topic carrying turtlesim poses
    pub pose_topic: String,
    /// Topic receiving velocity commands
    pub cmd_vel_topic: String,
    /// Seconds between control ticks (despite the name, a period)
    loop_frequency: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            node_name: "turtle_controller".to_string(),
            pose_topic: "/turtle1/pose".to_string(),
            cmd_vel_topic: "/turtle1/cmd_vel".to_string(),
            loop_frequency: 0.01,
        }
    }
}

impl ControllerConfig {
    /// Apply numeric overrides by name; unknown keys are ignored.
    ///
    /// `loop_frequency` must be finite and positive.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<()> {
        if let Some(&seconds) = params.get(LOOP_FREQUENCY_PARAM) {
            self.loop_frequency = validate_period(seconds)?;
        }

        Ok(())
    }

    pub fn loop_frequency(&self) -> f64 {
        self.loop_frequency
    }

    /// Control period as a duration
    pub fn loop_period(&self) -> Duration {
        Duration::from_secs_f64(self.loop_frequency)
    }
}

fn validate_period(seconds: f64) -> Result<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(ControllerError::InvalidParameter {
            name: LOOP_FREQUENCY_PARAM.to_string(),
            value: seconds,
        })
    }
}
