use euclid::default::{Point2D, Size2D};
use rust_fove_api::{FoveButton, FoveInput, FoveKey};
use std::cell::RefCell;
use std::collections::HashSet;

struct InputState {
    pointer: Point2D<f32>,
    buttons_down: HashSet<FoveButton>,
    buttons_held: HashSet<FoveButton>,
    keys_down: HashSet<FoveKey>,
    keys_held: HashSet<FoveKey>,
}

impl InputState {
    fn new() -> InputState {
        InputState {
            pointer: Point2D::origin(),
            buttons_down: HashSet::new(),
            buttons_held: HashSet::new(),
            keys_down: HashSet::new(),
            keys_held: HashSet::new(),
        }
    }
}

// Input device fed by the embedder (a window event loop, a replay, a test).
// Shared behind an Rc, so all mutation goes through a RefCell.
pub struct SoftwareInput {
    screen: Size2D<u32>,
    state: RefCell<InputState>,
}

impl SoftwareInput {
    pub fn new(screen: Size2D<u32>) -> SoftwareInput {
        SoftwareInput {
            screen: screen,
            state: RefCell::new(InputState::new()),
        }
    }

    pub fn set_pointer(&self, pointer: Point2D<f32>) {
        self.state.borrow_mut().pointer = pointer;
    }

    pub fn press(&self, button: FoveButton) {
        let mut state = self.state.borrow_mut();
        if state.buttons_held.insert(button) {
            state.buttons_down.insert(button);
        }
    }

    pub fn release(&self, button: FoveButton) {
        let mut state = self.state.borrow_mut();
        state.buttons_held.remove(&button);
        state.buttons_down.remove(&button);
    }

    pub fn press_key(&self, key: FoveKey) {
        let mut state = self.state.borrow_mut();
        if state.keys_held.insert(key) {
            state.keys_down.insert(key);
        }
    }

    pub fn release_key(&self, key: FoveKey) {
        let mut state = self.state.borrow_mut();
        state.keys_held.remove(&key);
        state.keys_down.remove(&key);
    }

    /// Forgets press transitions. Call once the host tick is over.
    pub fn end_tick(&self) {
        let mut state = self.state.borrow_mut();
        state.buttons_down.clear();
        state.keys_down.clear();
    }
}

impl FoveInput for SoftwareInput {
    fn pointer_position(&self) -> Point2D<f32> {
        self.state.borrow().pointer
    }

    fn button_down(&self, button: FoveButton) -> bool {
        self.state.borrow().buttons_down.contains(&button)
    }

    fn button_held(&self, button: FoveButton) -> bool {
        self.state.borrow().buttons_held.contains(&button)
    }

    fn key_down(&self, key: FoveKey) -> bool {
        self.state.borrow().keys_down.contains(&key)
    }

    fn key_held(&self, key: FoveKey) -> bool {
        self.state.borrow().keys_held.contains(&key)
    }

    fn screen_size(&self) -> Size2D<u32> {
        self.screen
    }
}
