use bitflags::bitflags;

bitflags! {
    /// Discrete actions requested this frame.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Actions: u8 {
        const QUIT               = 0x01;
        const TOGGLE_DIAGNOSTICS = 0x02;
        const TOGGLE_STRATEGY    = 0x04;
        const WIDEN_FOV          = 0x08;
        const NARROW_FOV         = 0x10;
        const TALLER_WALLS       = 0x20;
        const SHORTER_WALLS      = 0x40;
    }
}

/// Abstract input for one frame, already reduced from raw key state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1  (back / forward)
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (left / right)
    pub actions: Actions,
}

impl InputCmd {
    #[inline]
    pub fn wants(&self, action: Actions) -> bool {
        self.actions.contains(action)
    }

    /// `+1`, `-1` or `0` depending on which of a pair of actions is set.
    #[inline]
    pub fn axis(&self, plus: Actions, minus: Actions) -> f32 {
        self.wants(plus) as i8 as f32 - self.wants(minus) as i8 as f32
    }
}
