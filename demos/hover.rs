// demos/hover.rs

use quad_attitude_stabilization::{
    AngleMode, ArmingSwitch, AttitudeController, AttitudeSensor, AxisVector, ControllerConfig,
    MonotonicClock, PilotCommands, TimingMode,
};

/// Toy plant: roll/pitch/yaw angles driven by the differential motor thrust.
struct Plant {
    attitude: AxisVector<f32>,
    rate: AxisVector<f32>,
    throttle: f32,
    now: u64,
}

impl PilotCommands<f32> for Plant {
    fn commanded_roll(&self) -> f32 {
        0.0
    }

    fn commanded_pitch(&self) -> f32 {
        0.0
    }

    fn commanded_yaw(&self) -> f32 {
        0.0
    }

    fn commanded_throttle(&self) -> f32 {
        self.throttle
    }
}

impl AttitudeSensor<f32> for Plant {
    fn orientation_estimate(&self) -> AxisVector<f32> {
        self.attitude
    }

    fn rate_estimate(&self) -> AxisVector<f32> {
        self.rate
    }
}

impl ArmingSwitch for Plant {
    fn armed(&self) -> bool {
        true
    }
}

impl MonotonicClock for Plant {
    fn micros(&self) -> u64 {
        self.now
    }
}

fn main() {
    let mut config = ControllerConfig::<f32>::new();

    // Set the PID gains for roll, pitch, and yaw.
    config.kp_roll = 0.8;
    config.ki_roll = 0.05;
    config.kd_roll = 2.0;

    config.kp_pitch = config.kp_roll;
    config.ki_pitch = config.ki_roll;
    config.kd_pitch = config.kd_roll;

    config.kp_yaw = 0.5;
    config.ki_yaw = 0.0;
    config.kd_yaw = 0.0;

    // Bound the integral term and the motor commands.
    config.max_integral = 20.0;
    config.esc_min = 0.0;
    config.esc_max = 255.0;
    config.low_throttle_threshold = 10.0;

    config.timing = TimingMode::FixedInterval;
    config.angle_mode = AngleMode::Absolute;

    let mut controller = match AttitudeController::with_config(config) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return;
        }
    };

    // Start tilted and let the loop level the vehicle.
    let mut plant = Plant {
        attitude: AxisVector::new(10.0, -6.0, 0.0),
        rate: AxisVector::zero(),
        throttle: 120.0,
        now: 0,
    };
    controller.initialize(&plant);

    println!("  cycle,     Roll,    Pitch,      Yaw,   M1,   M2,   M3,   M4");
    for cycle in 0..=20 {
        controller.compute_cycle(&plant);
        let motor = controller.motor_command();

        println!(
            "  {:5}, {:-8.3}, {:-8.3}, {:-8.3}, {:4.0}, {:4.0}, {:4.0}, {:4.0}",
            cycle,
            plant.attitude.x,
            plant.attitude.y,
            plant.attitude.z,
            motor.one,
            motor.two,
            motor.three,
            motor.four,
        );

        // simulate response, torque proportional to the motor differential
        let roll_torque = (motor.one + motor.four) - (motor.two + motor.three);
        let pitch_torque = (motor.three + motor.four) - (motor.one + motor.two);
        let yaw_torque = (motor.two + motor.four) - (motor.one + motor.three);
        plant.rate = AxisVector::new(
            0.01 * roll_torque,
            0.01 * pitch_torque,
            0.01 * yaw_torque,
        );
        plant.attitude.x += plant.rate.x;
        plant.attitude.y += plant.rate.y;
        plant.attitude.z += plant.rate.z;
        plant.now += 1_000;
    }
}
