//! Common utilities and types for the turtle controller

/// Common types used across the codebase
pub mod types {
    /// Position and heading of the controlled vehicle
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Pose {
        pub x: f64,
        pub y: f64,
        /// Heading in radians, (-pi, pi]
        pub theta: f64,
    }

    impl Pose {
        pub fn new(x: f64, y: f64, theta: f64) -> Self {
            Pose { x, y, theta }
        }
    }

    /// A fixed goal coordinate
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Target {
        pub x: f64,
        pub y: f64,
    }

    impl Target {
        pub fn new(x: f64, y: f64) -> Self {
            Target { x, y }
        }
    }

    /// Velocity command for the vehicle
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct VelocityCommand {
        pub linear_x: f64,
        pub angular_z: f64,
    }

    impl VelocityCommand {
        /// Zero velocity, used to hold position once arrived
        pub const HOLD: VelocityCommand = VelocityCommand {
            linear_x: 0.0,
            angular_z: 0.0,
        };
    }
}
