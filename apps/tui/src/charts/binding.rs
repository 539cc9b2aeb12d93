use std::time::{Duration, Instant};

use crate::domain::{Term, Topic, TopicSet};

use super::tween::Tween;

/// Chart state for one topic: sorted terms, axis domain and visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBinding {
    key: String,
    terms: Vec<Term>,
    x_max: f64,
    visible: bool,
    reveal: Tween,
}

impl ChartBinding {
    fn build(topic: &Topic, duration: Duration) -> Self {
        let mut terms = topic.words.clone();
        terms.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        let x_max = terms
            .iter()
            .map(|term| term.probability)
            .fold(0.0_f64, f64::max);

        Self {
            key: topic.key.clone(),
            terms,
            x_max,
            visible: false,
            reveal: Tween::new(0.0, 1.0, duration),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Terms sorted by descending probability.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Upper end of the probability axis, fixed when the chart is built.
    pub const fn x_max(&self) -> f64 {
        self.x_max
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current position of every term marker, in term order.
    pub fn marker_positions(&self, now: Instant) -> Vec<f64> {
        let fraction = self.reveal.value(now);
        self.terms
            .iter()
            .map(|term| term.probability * fraction)
            .collect()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.reveal.is_running(now)
    }

    fn show(&mut self, now: Instant) {
        self.visible = true;
        self.reveal.start(now);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.reveal.reset();
    }
}

/// One chart per topic of the loaded set, exactly one of them visible.
///
/// Bindings are created once in [`TopicCharts::build`]; selecting a topic only
/// changes visibility and restarts the entrance animation.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicCharts {
    bindings: Vec<ChartBinding>,
    selected: Option<usize>,
}

impl TopicCharts {
    pub fn build(set: &TopicSet, duration: Duration, now: Instant) -> Self {
        let bindings = set
            .topics
            .iter()
            .map(|topic| ChartBinding::build(topic, duration))
            .collect();

        let mut charts = Self {
            bindings,
            selected: None,
        };
        charts.select_index(0, now);
        charts
    }

    pub fn bindings(&self) -> &[ChartBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ChartBinding> {
        self.selected.and_then(|index| self.bindings.get(index))
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected().map(ChartBinding::key)
    }

    pub fn binding(&self, key: &str) -> Option<&ChartBinding> {
        self.bindings.iter().find(|binding| binding.key == key)
    }

    /// Shows the topic at `index` and replays its entrance animation.
    ///
    /// Every other chart is hidden with its markers back at zero. Selecting the
    /// already visible topic replays the animation as well.
    pub fn select_index(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.bindings.len() {
            return false;
        }

        for (position, binding) in self.bindings.iter_mut().enumerate() {
            if position != index {
                binding.hide();
            }
        }
        self.bindings[index].show(now);
        self.selected = Some(index);
        true
    }

    pub fn select(&mut self, key: &str, now: Instant) -> bool {
        match self.bindings.iter().position(|binding| binding.key == key) {
            Some(index) => self.select_index(index, now),
            None => false,
        }
    }

    pub fn select_next(&mut self, now: Instant) -> bool {
        let len = self.bindings.len();
        if len == 0 {
            return false;
        }
        let next = self.selected.map_or(0, |index| (index + 1) % len);
        self.select_index(next, now)
    }

    pub fn select_previous(&mut self, now: Instant) -> bool {
        let len = self.bindings.len();
        if len == 0 {
            return false;
        }
        let previous = self
            .selected
            .map_or(0, |index| if index == 0 { len - 1 } else { index - 1 });
        self.select_index(previous, now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.selected().is_some_and(|binding| binding.is_animating(now))
    }
}
