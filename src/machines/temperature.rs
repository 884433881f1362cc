//! Hysteresis thermostat.
//!
//! Each mode decision depends on the exact temperature reached by the previous
//! step, so the transition is neither associative nor reducible to a closed
//! form. The block form is the plain fold over `step`.

use crate::container::{FromNumeric, Numeric, ToNumeric};
use crate::core::{fold_steps, ShapeError, StateMachine};
use serde::{Deserialize, Serialize};

/// Half-width of the band around the set point in which the controller idles.
pub const HYSTERESIS_BAND: f64 = 0.5;

/// Degrees added or removed per step while heating or cooling.
pub const DRIVE_RATE: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Heating,
    Cooling,
    Idle,
}

impl Mode {
    /// Temperature change contributed by the mode itself.
    pub fn drive(self) -> f64 {
        match self {
            Mode::Heating => DRIVE_RATE,
            Mode::Cooling => -DRIVE_RATE,
            Mode::Idle => 0.0,
        }
    }

    /// Pick the mode for `temperature` relative to `desired`.
    pub fn select(temperature: f64, desired: f64) -> Self {
        if temperature < desired - HYSTERESIS_BAND {
            Mode::Heating
        } else if temperature > desired + HYSTERESIS_BAND {
            Mode::Cooling
        } else {
            Mode::Idle
        }
    }

    fn code(self) -> f64 {
        match self {
            Mode::Heating => 0.0,
            Mode::Cooling => 1.0,
            Mode::Idle => 2.0,
        }
    }

    fn from_code(code: f64) -> Result<Self, ShapeError> {
        match code {
            c if c == 0.0 => Ok(Mode::Heating),
            c if c == 1.0 => Ok(Mode::Cooling),
            c if c == 2.0 => Ok(Mode::Idle),
            value => Err(ShapeError::InvalidValue { what: "mode", value }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermostatState {
    pub temperature: f64,
    pub mode: Mode,
}

/// Set point and outside disturbance for one step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermostatInput {
    pub desired: f64,
    pub influence: f64,
}

/// Drives temperature toward a set point, switching mode with hysteresis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TemperatureController;

impl StateMachine for TemperatureController {
    type State = ThermostatState;
    type Input = ThermostatInput;
    type Output = Mode;

    fn create_initial_state(&self) -> ThermostatState {
        ThermostatState {
            temperature: 20.0,
            mode: Mode::Idle,
        }
    }

    fn create_example_inputs(&self) -> Vec<ThermostatInput> {
        vec![ThermostatInput {
            desired: 22.0,
            influence: 0.2,
        }]
    }

    fn step(
        &self,
        state: ThermostatState,
        input: &ThermostatInput,
    ) -> Result<(ThermostatState, Mode), ShapeError> {
        let temperature = state.temperature + state.mode.drive() + input.influence;
        let mode = Mode::select(temperature, input.desired);
        Ok((ThermostatState { temperature, mode }, mode))
    }

    fn blockstep(
        &self,
        state: ThermostatState,
        inputs: &[ThermostatInput],
    ) -> Result<(ThermostatState, Vec<Mode>), ShapeError> {
        fold_steps(self, state, inputs)
    }
}

impl ToNumeric for Mode {
    fn to_numeric(&self) -> Numeric {
        Numeric::Scalar(self.code())
    }
}

impl FromNumeric for Mode {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        Mode::from_code(value.as_scalar()?)
    }
}

impl ToNumeric for ThermostatState {
    fn to_numeric(&self) -> Numeric {
        Numeric::record([
            ("temperature", Numeric::Scalar(self.temperature)),
            ("mode", self.mode.to_numeric()),
        ])
    }
}

impl FromNumeric for ThermostatState {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        let fields = value.fields(&["temperature", "mode"])?;
        Ok(Self {
            temperature: fields["temperature"].as_scalar()?,
            mode: Mode::from_numeric(&fields["mode"])?,
        })
    }
}

impl ToNumeric for ThermostatInput {
    fn to_numeric(&self) -> Numeric {
        Numeric::record([
            ("desired", Numeric::Scalar(self.desired)),
            ("influence", Numeric::Scalar(self.influence)),
        ])
    }
}

impl FromNumeric for ThermostatInput {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        let fields = value.fields(&["desired", "influence"])?;
        Ok(Self {
            desired: fields["desired"].as_scalar()?,
            influence: fields["influence"].as_scalar()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(desired: f64, influence: f64) -> ThermostatInput {
        ThermostatInput { desired, influence }
    }

    #[test]
    fn cold_room_starts_heating() {
        let controller = TemperatureController;
        let (state, mode) = controller
            .step(controller.create_initial_state(), &input(22.0, 0.2))
            .unwrap();

        assert!((state.temperature - 20.2).abs() < 1e-12);
        assert_eq!(mode, Mode::Heating);
        assert_eq!(state.mode, Mode::Heating);
    }

    #[test]
    fn mode_drives_temperature() {
        let controller = TemperatureController;
        let heating = ThermostatState {
            temperature: 18.0,
            mode: Mode::Heating,
        };
        let (state, _) = controller.step(heating, &input(20.0, 0.0)).unwrap();
        assert_eq!(state.temperature, 19.0);

        let cooling = ThermostatState {
            temperature: 25.0,
            mode: Mode::Cooling,
        };
        let (state, mode) = controller.step(cooling, &input(20.0, 0.0)).unwrap();
        assert_eq!(state.temperature, 24.0);
        assert_eq!(mode, Mode::Cooling);
    }

    #[test]
    fn within_band_is_idle() {
        assert_eq!(Mode::select(21.6, 22.0), Mode::Idle);
        assert_eq!(Mode::select(22.5, 22.0), Mode::Idle);
        assert_eq!(Mode::select(21.4, 22.0), Mode::Heating);
        assert_eq!(Mode::select(22.6, 22.0), Mode::Cooling);
    }

    #[test]
    fn blockstep_follows_sequential_steps() {
        let controller = TemperatureController;
        let inputs = vec![input(22.0, 0.2), input(22.0, 0.0), input(22.0, -0.3)];

        let (state, modes) = controller
            .blockstep(controller.create_initial_state(), &inputs)
            .unwrap();

        // 20.2 heating, 21.2 heating, 21.9 idle
        assert_eq!(modes, vec![Mode::Heating, Mode::Heating, Mode::Idle]);
        assert!((state.temperature - 21.9).abs() < 1e-9);
    }

    #[test]
    fn same_influences_in_different_order_diverge() {
        let controller = TemperatureController;
        let start = controller.create_initial_state();
        let forward = [input(20.0, 2.0), input(20.0, -2.0)];
        let reverse = [input(20.0, -2.0), input(20.0, 2.0)];

        let (_, forward_modes) = controller.blockstep(start, &forward).unwrap();
        let (_, reverse_modes) = controller.blockstep(start, &reverse).unwrap();

        assert_eq!(forward_modes, vec![Mode::Cooling, Mode::Heating]);
        assert_eq!(reverse_modes, vec![Mode::Heating, Mode::Cooling]);
    }

    #[test]
    fn mode_codes_round_trip() {
        for mode in [Mode::Heating, Mode::Cooling, Mode::Idle] {
            assert_eq!(Mode::from_numeric(&mode.to_numeric()), Ok(mode));
        }
        assert!(Mode::from_numeric(&Numeric::Scalar(7.0)).is_err());
    }

    #[test]
    fn mode_serializes_by_name() {
        let json = serde_json::to_string(&Mode::Heating).unwrap();
        assert_eq!(json, "\"Heating\"");
    }
}
