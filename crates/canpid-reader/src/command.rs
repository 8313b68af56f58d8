//! Command-line commands.

use std::str::FromStr;

use thiserror::Error;

use canpid_codec::ParameterId;

/// Live Mode 01 PIDs read by `all`, in output order.
pub const LIVE_PIDS: [ParameterId; 7] = [
    ParameterId::EngineRpm,
    ParameterId::VehicleSpeed,
    ParameterId::ThrottlePosition,
    ParameterId::FuelTankLevelInput,
    ParameterId::CalculatedEngineLoad,
    ParameterId::EngineCoolantTemperature,
    ParameterId::FuelPressure,
];

/// What the reader should query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the supported-PID table.
    Supported,
    /// Read a single live PID.
    Read(ParameterId),
    /// Supported table followed by every live PID.
    All,
}

#[derive(Debug, Error)]
#[error("unknown command '{0}' (expected supported, rpm, speed, throttle, fuel, load, coolant, fuel-pressure or all)")]
pub struct UnknownCommand(String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.to_ascii_lowercase().as_str() {
            "supported" => Command::Supported,
            "rpm" => Command::Read(ParameterId::EngineRpm),
            "speed" => Command::Read(ParameterId::VehicleSpeed),
            "throttle" => Command::Read(ParameterId::ThrottlePosition),
            "fuel" => Command::Read(ParameterId::FuelTankLevelInput),
            "load" => Command::Read(ParameterId::CalculatedEngineLoad),
            "coolant" => Command::Read(ParameterId::EngineCoolantTemperature),
            "fuel-pressure" => Command::Read(ParameterId::FuelPressure),
            "all" => Command::All,
            _ => return Err(UnknownCommand(s.to_string())),
        };
        Ok(command)
    }
}
