//! Two-layer flow-map phase driving the ripple normal cross-fade.

/// Phase offsets of the two ripple layers, half a cycle apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    pub offset_a: f32,
    pub offset_b: f32,
    pub cycle: f32,
    /// Offset units per second.
    pub speed: f32,
}

impl FlowState {
    pub fn new(speed: f32, cycle: f32) -> Self {
        Self {
            offset_a: 0.0,
            offset_b: cycle * 0.5,
            cycle,
            speed,
        }
    }

    pub fn half_cycle(&self) -> f32 {
        self.cycle * 0.5
    }

    /// Advances both layers by `delta_secs`.
    ///
    /// Layer A resets both offsets once it reaches the cycle length; otherwise
    /// layer B alone wraps back by one cycle.
    pub fn advance(&mut self, delta_secs: f32) {
        let half = self.half_cycle();
        self.offset_a += self.speed * delta_secs;
        self.offset_b = self.offset_a + half;

        if self.offset_a >= self.cycle {
            self.offset_a = 0.0;
            self.offset_b = half;
        } else if self.offset_b >= self.cycle {
            self.offset_b -= self.cycle;
        }
    }

    /// Mix factor from layer A towards layer B.
    pub fn blend_weight(&self) -> f32 {
        let half = self.half_cycle();
        (half - self.offset_a).abs() / half
    }

}

impl Default for FlowState {
    fn default() -> Self {
        Self::new(constants::flow::FLOW_SPEED, constants::flow::FLOW_CYCLE)
    }
}
