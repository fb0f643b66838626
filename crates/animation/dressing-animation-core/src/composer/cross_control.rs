//! Cross-control actions: parameter drivers that push values onto other
//! controls when a control turns on or off.
//!
//! Actions form a graph over `(control, phase)` nodes, where `phase` is
//! `true` for "enabled". An action of A's `phase` writing an enable value to
//! B is an edge `(A, phase) -> (B, true)`. Controls on a cycle of that graph
//! would drive each other forever; they are reported and get no drivers.

use std::collections::VecDeque;
use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::context::Context;
use crate::control::{ControlValue, DriverType};
use crate::controller::{DriverChangeType, DriverParameter, StateBehaviour, StateId};
use crate::ids::ControlId;

use super::{is_enable_value, ComposedControl, ControlStates, SmartControlComposer, LOG_LABEL};

type Node = (ControlId, bool);

/// Nodes Kahn's algorithm cannot order: everything on a cycle plus
/// everything downstream of one.
fn unordered<T: Copy + Eq + Hash>(edges: impl IntoIterator<Item = (T, T)>) -> HashSet<T> {
    let mut indeg: HashMap<T, usize> = HashMap::new();
    let mut adj: HashMap<T, Vec<T>> = HashMap::new();
    for (u, v) in edges {
        indeg.entry(u).or_insert(0);
        adj.entry(u).or_default().push(v);
        *indeg.entry(v).or_default() += 1;
    }

    let mut q: VecDeque<T> = indeg
        .iter()
        .filter(|(_, &d)| d == 0)
        .map(|(k, _)| *k)
        .collect();
    let mut ordered = HashSet::new();
    while let Some(u) = q.pop_front() {
        ordered.insert(u);
        if let Some(vs) = adj.get(&u) {
            for v in vs {
                if let Some(d) = indeg.get_mut(v) {
                    *d -= 1;
                    if *d == 0 {
                        q.push_back(*v);
                    }
                }
            }
        }
    }
    indeg.into_keys().filter(|n| !ordered.contains(n)).collect()
}

/// Nodes that lie on a cycle (or on a path joining two cycles): those left
/// unordered both forwards and backwards.
pub(crate) fn cyclic_nodes<T: Copy + Eq + Hash>(edges: &[(T, T)]) -> HashSet<T> {
    let forward = unordered(edges.iter().copied());
    let backward = unordered(edges.iter().map(|&(u, v)| (v, u)));
    forward.intersection(&backward).copied().collect()
}

fn has_phases(states: &ControlStates) -> bool {
    matches!(
        states,
        ControlStates::Binary { .. } | ControlStates::SlotMember { .. }
    )
}

impl<'a> SmartControlComposer<'a> {
    fn action_edges(&self) -> Vec<(Node, Node)> {
        let mut edges = Vec::new();
        for (&id, control) in &self.composed {
            if !has_phases(&control.states) {
                continue;
            }
            let actions = &control.actions;
            for (phase, values) in [
                (true, &actions.values_on_enable),
                (false, &actions.values_on_disable),
            ] {
                for cv in values {
                    let reaches_states = self
                        .composed
                        .get(&cv.control)
                        .is_some_and(|t| has_phases(&t.states));
                    if reaches_states {
                        edges.push(((id, phase), (cv.control, is_enable_value(cv.value))));
                    }
                }
            }
        }
        edges
    }

    /// State whose entry marks `id` turning on (`phase`) or off.
    fn phase_state(&self, id: ControlId, control: &ComposedControl, phase: bool) -> Option<(usize, StateId)> {
        match &control.states {
            ControlStates::Binary {
                layer,
                enabled,
                disabled,
                ..
            } => Some((*layer, if phase { *enabled } else { *disabled })),
            ControlStates::SlotMember { slot, .. } => {
                let slot_layer = self.slot_layers.get(slot)?;
                let &(enabled, prepare) = slot_layer.members.get(&id)?;
                Some((slot_layer.layer, if phase { enabled } else { prepare }))
            }
            ControlStates::MotionTime { .. } => {
                log::debug!("{} is a motion-time control, ignoring its cross-control actions", control.name);
                None
            }
            ControlStates::Skipped => None,
        }
    }

    /// Driver entry writing `cv` onto its target's parameter.
    fn driver_for(&self, ctx: &mut Context, source: &str, cv: &ControlValue) -> Option<DriverParameter> {
        let Some(target) = self.composed.get(&cv.control) else {
            ctx.report.log_warn(
                LOG_LABEL,
                format!("{source} targets {} which was not composed in this pass", cv.control),
            );
            return None;
        };
        if let ControlStates::SlotMember { slot, mapped_value } = &target.states {
            let slot_layer = self.slot_layers.get(slot)?;
            let value = if is_enable_value(cv.value) {
                *mapped_value
            } else {
                slot_layer.default_value
            };
            return Some(DriverParameter {
                change_type: DriverChangeType::Set,
                name: slot_layer.parameter.clone(),
                value: value as f32,
            });
        }
        if target.driver_type == DriverType::VrcPhysBone {
            ctx.report.log_warn(
                LOG_LABEL,
                format!("{source} cannot drive physics bone control {}", target.name),
            );
            return None;
        }
        let Some(parameter) = target.parameter.clone() else {
            ctx.report
                .log_warn(LOG_LABEL, format!("{source} targets {} which has no parameter", target.name));
            return None;
        };
        Some(DriverParameter {
            change_type: DriverChangeType::Set,
            name: parameter,
            value: cv.value,
        })
    }

    pub(super) fn wire_cross_controls(&mut self, ctx: &mut Context) {
        let cyclic: HashSet<ControlId> = cyclic_nodes(&self.action_edges())
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        let mut plan: Vec<(usize, StateId, Vec<DriverParameter>)> = Vec::new();
        for (&id, control) in &self.composed {
            if control.actions.is_empty() {
                continue;
            }
            if cyclic.contains(&id) {
                ctx.report.log_error(
                    LOG_LABEL,
                    format!(
                        "Cross control cycle detected: {} drives controls that drive it back, no drivers generated",
                        control.name
                    ),
                );
                continue;
            }
            for (phase, values) in [
                (true, &control.actions.values_on_enable),
                (false, &control.actions.values_on_disable),
            ] {
                if values.is_empty() {
                    continue;
                }
                let Some((layer, state)) = self.phase_state(id, control, phase) else {
                    continue;
                };
                let parameters: Vec<DriverParameter> = values
                    .iter()
                    .filter_map(|cv| self.driver_for(ctx, &control.name, cv))
                    .collect();
                if !parameters.is_empty() {
                    plan.push((layer, state, parameters));
                }
            }
        }

        let mut animator = self.animator();
        for (layer, state, parameters) in plan {
            let Some(mut layer) = animator.layer(layer) else {
                continue;
            };
            if let Some(state) = layer.state(state) {
                state.add_behaviour(StateBehaviour::ParameterDriver {
                    local_only: false,
                    parameters,
                });
            }
        }
    }
}
