//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions back in order, one queue per
/// port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Returns `true` if an interaction is still queued for the pair.
    #[must_use]
    pub fn has_next(&self, port: &str, method: &str) -> bool {
        self.queues
            .get(&(port.to_string(), method.to_string()))
            .is_some_and(|q| !q.is_empty())
    }

    /// Return the output of the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair. The
    /// message lists which pairs the cassette does contain.
    pub fn next_output(&mut self, port: &str, method: &str) -> serde_json::Value {
        let known: Vec<String> = self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
        let Some(queue) = self.queues.get_mut(&(port.to_string(), method.to_string())) else {
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                known.join(", ")
            );
        };
        match queue.pop_front() {
            Some(interaction) => interaction.output,
            None => panic!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed"
            ),
        }
    }
}
