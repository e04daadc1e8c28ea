//! Fluent builder for constructing a [`Sim`].

use bp_core::{PortConfig, SimRng, TerminalId, Tick};
use bp_network::SailingMatrix;
use bp_terminal::Terminal;

use crate::{ArrivalGenerator, ArrivalProfile, Event, Sim, SimError, SimResult};

/// Seed offset of the arrival generator's RNG stream.
const GENERATOR_STREAM: u64 = 1;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`PortConfig`]: admission mode, slack, travel-time model, horizon, seed
/// - [`SailingMatrix`]: row/column 0 is the port, one row per terminal after it
///
/// # Optional inputs
///
/// | Method          | Default                                   |
/// |-----------------|-------------------------------------------|
/// | `.arrivals(p)`  | No generator; barges come from `create_vessel` |
///
/// # Example
///
/// ```rust,ignore
/// let matrix = load_matrix_csv("sailing.csv")?;
/// let mut sim = SimBuilder::new(PortConfig::default(), matrix)
///     .arrivals(ArrivalProfile::default())
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   PortConfig,
    network:  SailingMatrix,
    arrivals: Option<ArrivalProfile>,
}

impl SimBuilder {
    pub fn new(config: PortConfig, network: SailingMatrix) -> Self {
        Self { config, network, arrivals: None }
    }

    /// Generate barges at random from `profile` until `config.end_tick`.
    pub fn arrivals(mut self, profile: ArrivalProfile) -> Self {
        self.arrivals = Some(profile);
        self
    }

    /// Validate inputs, create one terminal per matrix row, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        if self.network.is_empty() {
            return Err(SimError::EmptyNetwork);
        }
        if let Some(profile) = &self.arrivals {
            profile.validate()?;
        }

        let terminals = (0..self.network.len())
            .map(|i| {
                TerminalId::try_from(i)
                    .map(|id| Terminal::new(id, self.config.admission))
                    .map_err(|_| SimError::Itinerary(format!("terminal index {i} out of range")))
            })
            .collect::<SimResult<Vec<_>>>()?;

        let mut rng = SimRng::new(self.config.seed);
        let generator = self.arrivals.map(|profile| {
            ArrivalGenerator::new(profile, rng.child(GENERATOR_STREAM), self.network.len())
        });

        let end = self.config.end_tick;
        let mut sim = Sim::new(self.config, self.network, terminals, rng, generator);
        if let Some(generator) = sim.generator.as_mut() {
            let first = Tick::ZERO + generator.next_gap();
            if first < end {
                sim.queue.push(first, Event::PortArrival.priority(), Event::PortArrival);
            }
        }
        Ok(sim)
    }
}
