use anyhow::{anyhow, Error, Result};
use env_logger::Env;
use log::{error, info};
use rclrs::{
    Context, CreateBasicExecutor, Node, RclrsErrorFilter, SpinOptions, QOS_PROFILE_DEFAULT,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use turtle_controller::config::LOOP_FREQUENCY_PARAM;
use turtle_controller::{
    CommandSink, ControlLoop, ControlStack, ControllerConfig, ControllerError, Pose,
    VelocityCommand,
};

use geometry_msgs::msg::Twist;
use turtlesim::msg::Pose as TurtlePose;

/// Publishes velocity commands as Twist messages
struct TwistSink {
    publisher: Arc<rclrs::Publisher<Twist>>,
}

impl CommandSink for TwistSink {
    fn publish(&self, command: &VelocityCommand) -> turtle_controller::Result<()> {
        let mut twist = Twist::default();
        twist.linear.x = command.linear_x;
        twist.angular.z = command.angular_z;

        self.publisher
            .publish(&twist)
            .map_err(|e| ControllerError::Publish(e.to_string()))
    }
}

struct TurtleControllerNode {
    _node: Arc<Node>,
    _pose_subscription: Arc<rclrs::Subscription<TurtlePose>>,
    // Stops and joins the loop thread when the node is dropped
    _control_loop: ControlLoop,
}

impl TurtleControllerNode {
    pub fn new(executor: &rclrs::Executor, mut config: ControllerConfig) -> Result<Self> {
        let node = executor.create_node(config.node_name.as_str())?;

        let loop_frequency = node
            .declare_parameter(LOOP_FREQUENCY_PARAM)
            .default(config.loop_frequency())
            .mandatory()
            .map_err(|e| anyhow!("failed to declare {}: {:?}", LOOP_FREQUENCY_PARAM, e))?;

        let mut params = HashMap::new();
        params.insert(LOOP_FREQUENCY_PARAM.to_string(), loop_frequency.get());
        config.configure(&params)?;

        info!(
            "Using parameters: {}={}",
            LOOP_FREQUENCY_PARAM,
            config.loop_frequency()
        );
        info!(
            "Topics: pose={}, cmd_vel={}",
            config.pose_topic, config.cmd_vel_topic
        );

        let cmd_vel_publisher =
            node.create_publisher::<Twist>(&config.cmd_vel_topic, QOS_PROFILE_DEFAULT)?;

        let stack = Arc::new(Mutex::new(ControlStack::default()));

        // The callback only holds the stack, so dropping the node tears everything down
        let stack_clone = Arc::clone(&stack);
        let pose_subscription = node.create_subscription::<TurtlePose, _>(
            &config.pose_topic,
            QOS_PROFILE_DEFAULT,
            move |msg: TurtlePose| {
                pose_callback(&stack_clone, msg);
            },
        )?;

        let control_loop = ControlLoop::spawn(
            stack,
            TwistSink {
                publisher: cmd_vel_publisher,
            },
            config.loop_period(),
        );

        info!("{} node started", config.node_name);

        Ok(TurtleControllerNode {
            _node: node,
            _pose_subscription: pose_subscription,
            _control_loop: control_loop,
        })
    }
}

fn pose_callback(stack: &Mutex<ControlStack>, msg: TurtlePose) {
    info!(
        "turtle position : x={:.3}, y={:.3}, theta={:.3}",
        msg.x, msg.y, msg.theta
    );

    let pose = Pose::new(msg.x as f64, msg.y as f64, msg.theta as f64);
    match stack.lock() {
        Ok(mut stack) => stack.on_pose(pose),
        Err(_) => error!("Control stack lock poisoned, dropping pose"),
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Initializing turtle controller node...");

    // Parameters can be overridden with
    // --ros-args --params-file config/turtle_controller_params.yaml
    let mut executor = Context::default_from_env()?.create_basic_executor();

    let turtle_controller_node =
        TurtleControllerNode::new(&executor, ControllerConfig::default())?;

    let result: Result<(), Error> = executor
        .spin(SpinOptions::default())
        .first_error()
        .map_err(|err| err.into());

    drop(turtle_controller_node);
    info!("Turtle controller node shut down");

    result
}
