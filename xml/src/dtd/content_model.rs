//! Content-model matching.
//!
//! Each `children` content expression compiles once into an ε-NFA by
//! Thompson construction; matching an element's child-name sequence is then
//! a linear simulation, so deeply nested or ambiguous models cost no more
//! than simple ones.

use super::{ContentParticle, Occurrence, ParticleTerm};
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Transition {
    Epsilon(usize),
    Name(String, usize),
}

#[derive(Debug, Clone, Default)]
struct State {
    transitions: Vec<Transition>,
}

/// A compiled content model.
#[derive(Debug, Clone)]
pub struct ContentModel {
    states: Vec<State>,
    start: usize,
    accept: usize,
}

impl ContentModel {
    /// Compiles a children content expression.
    pub fn compile(particle: &ContentParticle) -> Self {
        let mut states = Vec::new();
        let (start, accept) = build(particle, &mut states);
        Self {
            states,
            start,
            accept,
        }
    }

    /// Runs the model against a sequence of child element names.
    pub fn matches(&self, names: &[&str]) -> bool {
        let mut current = self.closure([self.start].into_iter().collect());
        for name in names {
            let mut next = HashSet::new();
            for &state in &current {
                for transition in &self.states[state].transitions {
                    if let Transition::Name(expected, target) = transition {
                        if expected == name {
                            next.insert(*target);
                        }
                    }
                }
            }
            if next.is_empty() {
                return false;
            }
            current = self.closure(next);
        }
        current.contains(&self.accept)
    }

    /// ε-closure of a state set.
    fn closure(&self, mut states: HashSet<usize>) -> HashSet<usize> {
        let mut stack: Vec<usize> = states.iter().copied().collect();
        while let Some(state) = stack.pop() {
            for transition in &self.states[state].transitions {
                if let Transition::Epsilon(target) = transition {
                    if states.insert(*target) {
                        stack.push(*target);
                    }
                }
            }
        }
        states
    }
}

fn new_state(states: &mut Vec<State>) -> usize {
    states.push(State::default());
    states.len() - 1
}

fn link(states: &mut [State], from: usize, transition: Transition) {
    states[from].transitions.push(transition);
}

/// Builds the fragment for a particle, returning its entry and exit states.
fn build(particle: &ContentParticle, states: &mut Vec<State>) -> (usize, usize) {
    let (inner_start, inner_end) = match &particle.term {
        ParticleTerm::Name(name) => {
            let start = new_state(states);
            let end = new_state(states);
            link(states, start, Transition::Name(name.clone(), end));
            (start, end)
        }
        ParticleTerm::Seq(parts) => {
            let start = new_state(states);
            let mut end = start;
            for part in parts {
                let (part_start, part_end) = build(part, states);
                link(states, end, Transition::Epsilon(part_start));
                end = part_end;
            }
            (start, end)
        }
        ParticleTerm::Choice(parts) => {
            let start = new_state(states);
            let end = new_state(states);
            for part in parts {
                let (part_start, part_end) = build(part, states);
                link(states, start, Transition::Epsilon(part_start));
                link(states, part_end, Transition::Epsilon(end));
            }
            (start, end)
        }
    };
    match particle.occurrence {
        Occurrence::Once => (inner_start, inner_end),
        Occurrence::Optional => {
            let start = new_state(states);
            let end = new_state(states);
            link(states, start, Transition::Epsilon(inner_start));
            link(states, inner_end, Transition::Epsilon(end));
            link(states, start, Transition::Epsilon(end));
            (start, end)
        }
        Occurrence::ZeroOrMore => {
            let start = new_state(states);
            let end = new_state(states);
            link(states, start, Transition::Epsilon(inner_start));
            link(states, inner_end, Transition::Epsilon(end));
            link(states, start, Transition::Epsilon(end));
            link(states, inner_end, Transition::Epsilon(inner_start));
            (start, end)
        }
        Occurrence::OneOrMore => {
            let start = new_state(states);
            let end = new_state(states);
            link(states, start, Transition::Epsilon(inner_start));
            link(states, inner_end, Transition::Epsilon(end));
            link(states, inner_end, Transition::Epsilon(inner_start));
            (start, end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> ContentParticle {
        ContentParticle::new(ParticleTerm::Name(text.to_string()), Occurrence::Once)
    }

    fn with_occurrence(mut particle: ContentParticle, occurrence: Occurrence) -> ContentParticle {
        particle.occurrence = occurrence;
        particle
    }

    #[test]
    fn single_name_matches_exactly_once() {
        let model = ContentModel::compile(&name("a"));
        assert!(model.matches(&["a"]));
        assert!(!model.matches(&[]));
        assert!(!model.matches(&["a", "a"]));
        assert!(!model.matches(&["b"]));
    }

    #[test]
    fn sequence_requires_order() {
        let particle = ContentParticle::new(
            ParticleTerm::Seq(vec![name("a"), name("b")]),
            Occurrence::Once,
        );
        let model = ContentModel::compile(&particle);
        assert!(model.matches(&["a", "b"]));
        assert!(!model.matches(&["b", "a"]));
        assert!(!model.matches(&["a"]));
        assert!(!model.matches(&["a", "c"]));
    }

    #[test]
    fn choice_accepts_either_branch() {
        let particle = ContentParticle::new(
            ParticleTerm::Choice(vec![name("a"), name("b")]),
            Occurrence::Once,
        );
        let model = ContentModel::compile(&particle);
        assert!(model.matches(&["a"]));
        assert!(model.matches(&["b"]));
        assert!(!model.matches(&["a", "b"]));
    }

    #[test]
    fn optional_accepts_zero_or_one() {
        let model = ContentModel::compile(&with_occurrence(name("a"), Occurrence::Optional));
        assert!(model.matches(&[]));
        assert!(model.matches(&["a"]));
        assert!(!model.matches(&["a", "a"]));
    }

    #[test]
    fn zero_or_more_accepts_any_count() {
        let model = ContentModel::compile(&with_occurrence(name("a"), Occurrence::ZeroOrMore));
        assert!(model.matches(&[]));
        assert!(model.matches(&["a"]));
        assert!(model.matches(&["a", "a", "a"]));
        assert!(!model.matches(&["a", "b"]));
    }

    #[test]
    fn one_or_more_requires_at_least_one() {
        let model = ContentModel::compile(&with_occurrence(name("a"), Occurrence::OneOrMore));
        assert!(!model.matches(&[]));
        assert!(model.matches(&["a"]));
        assert!(model.matches(&["a", "a"]));
    }

    #[test]
    fn nested_groups_compose() {
        // (a, (b | c)*, d+)
        let particle = ContentParticle::new(
            ParticleTerm::Seq(vec![
                name("a"),
                with_occurrence(
                    ContentParticle::new(
                        ParticleTerm::Choice(vec![name("b"), name("c")]),
                        Occurrence::Once,
                    ),
                    Occurrence::ZeroOrMore,
                ),
                with_occurrence(name("d"), Occurrence::OneOrMore),
            ]),
            Occurrence::Once,
        );
        let model = ContentModel::compile(&particle);
        assert!(model.matches(&["a", "d"]));
        assert!(model.matches(&["a", "b", "c", "b", "d", "d"]));
        assert!(!model.matches(&["a", "b"]));
        assert!(!model.matches(&["b", "d"]));
    }

    #[test]
    fn ambiguous_model_still_matches_linearly() {
        // (a, b?) | (a, c) is ambiguous on the leading a but matches fine
        let particle = ContentParticle::new(
            ParticleTerm::Choice(vec![
                ContentParticle::new(
                    ParticleTerm::Seq(vec![
                        name("a"),
                        with_occurrence(name("b"), Occurrence::Optional),
                    ]),
                    Occurrence::Once,
                ),
                ContentParticle::new(
                    ParticleTerm::Seq(vec![name("a"), name("c")]),
                    Occurrence::Once,
                ),
            ]),
            Occurrence::Once,
        );
        let model = ContentModel::compile(&particle);
        assert!(model.matches(&["a"]));
        assert!(model.matches(&["a", "b"]));
        assert!(model.matches(&["a", "c"]));
        assert!(!model.matches(&["c"]));
    }
}
