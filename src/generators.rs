//! Deterministic generator engine (spec §4.4, component 4).
//!
//! Per ciphersuite, a rolling seed `V` is repeatedly expanded and mapped to
//! a G1 point via `hash_to_curve`; the resulting sequence is cached and
//! only ever extended, never mutated in place (spec §5 "Monotonicity").
//! Grounded on the teacher's pattern of a lazily-initialized, mutex-guarded
//! process-wide cache (`once_cell::sync::Lazy<Mutex<_>>`), the same shape
//! the teacher reaches for anywhere it needs shared, lock-guarded state.

use std::sync::Mutex;

use blstrs::G1Projective;
use once_cell::sync::Lazy;

use crate::ciphersuite::Ciphersuite;
use crate::error::{Error, Result};
use crate::field::expand_for;
use crate::hash2curve::hash_to_curve;
use crate::util::i2osp;

/// Upper bound on a single `create_generators` request (spec §7:
/// "generator count request too large (> 2^64 - 1)"). In practice no
/// caller needs more than a handful of thousand generators, so this core
/// additionally rejects anything past a safely-allocatable ceiling well
/// under the spec's own u64 bound.
const MAX_GENERATOR_REQUEST: u64 = 1 << 32;

struct GeneratorState {
    generators: Vec<G1Projective>,
    v: Vec<u8>,
}

impl GeneratorState {
    const fn new() -> Self {
        Self { generators: Vec::new(), v: Vec::new() }
    }
}

static SHA256_STATE: Lazy<Mutex<GeneratorState>> = Lazy::new(|| Mutex::new(GeneratorState::new()));
static SHAKE256_STATE: Lazy<Mutex<GeneratorState>> = Lazy::new(|| Mutex::new(GeneratorState::new()));

fn state_for(cs: Ciphersuite) -> &'static Mutex<GeneratorState> {
    match cs {
        Ciphersuite::Sha256 => &SHA256_STATE,
        Ciphersuite::Shake256 => &SHAKE256_STATE,
    }
}

fn extend(cs: Ciphersuite, state: &mut GeneratorState, n: u64) -> Result<()> {
    if state.v.is_empty() {
        state.v = expand_for(cs, &cs.generator_seed(), &cs.seed_dst(), 48)?;
    }
    let seed_dst = cs.seed_dst();
    let generator_dst = cs.generator_dst();
    let mut next_index = state.generators.len() as u64 + 1;
    while (state.generators.len() as u64) < n {
        let mut input = state.v.clone();
        input.extend_from_slice(&i2osp(next_index, 8)?);
        state.v = expand_for(cs, &input, &seed_dst, 48)?;
        state.generators.push(hash_to_curve(cs, &state.v, &generator_dst)?);
        next_index += 1;
    }
    Ok(())
}

/// Cached form: extends the process-wide per-ciphersuite cache if needed,
/// then returns the first `n` generators.
pub fn create_generators(cs: Ciphersuite, n: u64) -> Result<Vec<G1Projective>> {
    if n > MAX_GENERATOR_REQUEST {
        return Err(Error::InvalidArgument("generator count request too large"));
    }
    let mut state = state_for(cs).lock().expect("generator cache mutex poisoned");
    if (state.generators.len() as u64) < n {
        extend(cs, &mut state, n)?;
    }
    Ok(state.generators[..n as usize].to_vec())
}

/// Pure form: derive generators from an explicit starting `(generators, V)`
/// pair instead of the shared cache, so callers (tests, in particular) can
/// assert extend-then-read equivalence without touching global state.
pub fn create_generators_from(
    cs: Ciphersuite,
    start: &[G1Projective],
    v: &[u8],
    n: u64,
) -> Result<Vec<G1Projective>> {
    if n > MAX_GENERATOR_REQUEST {
        return Err(Error::InvalidArgument("generator count request too large"));
    }
    let mut state = GeneratorState { generators: start.to_vec(), v: v.to_vec() };
    if (state.generators.len() as u64) < n {
        extend(cs, &mut state, n)?;
    }
    Ok(state.generators[..n as usize].to_vec())
}
