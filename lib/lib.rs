#![allow(non_snake_case)]

//! Hamiltonian models of coupled superconducting transmons (Duffing
//! oscillators), with the carrier-frequency and time-step analysis needed to
//! parameterize optimal-control pulses for an external simulator.

pub mod error;
pub mod utils;
pub mod ladder;
pub mod hamiltonian;
pub mod resonance;
pub mod timesteps;
pub mod config;
pub mod setup;
pub mod output;

pub use error::{ Error, Result };
pub use hamiltonian::{ hamiltonians, HBuilder, HParams, Hamiltonians };
pub use resonance::{ get_resonances, ResonanceConfig, Resonances };
pub use timesteps::{ estimate_timesteps, TimestepConfig };
pub use config::ModelConfig;
pub use setup::Setup;
