//! Go-to-goal controller for the turtlesim turtle.
//!
//! The library holds the ROS-free core: the proportional control law, the
//! control stack that emits its commands, configuration and a kinematic
//! turtle for offline runs. The ROS 2 node lives in
//! `src/bin/turtle_controller_node.rs`.

pub mod common;
pub mod config;
pub mod control;
pub mod error;
pub mod sim;

pub use crate::common::types::{Pose, Target, VelocityCommand};
pub use crate::config::ControllerConfig;
pub use crate::control::controllers::{ControlMode, GoToGoalController};
pub use crate::control::control_loop::ControlLoop;
pub use crate::control::{CommandSink, ControlStack};
pub use crate::error::{ControllerError, Result};
