//! Input event types for mouse, touch, keyboard and wheel

use smallvec::SmallVec;

/// Dispatch name of an input event
///
/// Gesture handlers receive this alongside the event itself; it is the
/// only thing that distinguishes a window-level move from a map-level one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseOver,
    MouseOut,
    /// Mouse move observed at document level
    MouseMoveWindow,
    /// Mouse release observed at document level
    MouseUpWindow,
    Click,
    DoubleClick,
    ContextMenu,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    KeyDown,
    KeyUp,
    Wheel,
    Blur,
    /// Synthesized once per serviced frame
    RenderFrame,
}

impl InputKind {
    /// Lowercase name, matching DOM event types
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::MouseDown => "mousedown",
            InputKind::MouseMove => "mousemove",
            InputKind::MouseUp => "mouseup",
            InputKind::MouseOver => "mouseover",
            InputKind::MouseOut => "mouseout",
            InputKind::MouseMoveWindow => "mousemoveWindow",
            InputKind::MouseUpWindow => "mouseupWindow",
            InputKind::Click => "click",
            InputKind::DoubleClick => "dblclick",
            InputKind::ContextMenu => "contextmenu",
            InputKind::TouchStart => "touchstart",
            InputKind::TouchMove => "touchmove",
            InputKind::TouchEnd => "touchend",
            InputKind::TouchCancel => "touchcancel",
            InputKind::KeyDown => "keydown",
            InputKind::KeyUp => "keyup",
            InputKind::Wheel => "wheel",
            InputKind::Blur => "blur",
            InputKind::RenderFrame => "renderFrame",
        }
    }

    /// The document-level counterpart of this kind
    ///
    /// Only mouse moves and releases have one; every other kind is returned
    /// unchanged.
    pub fn window_variant(self) -> Self {
        match self {
            InputKind::MouseMove => InputKind::MouseMoveWindow,
            InputKind::MouseUp => InputKind::MouseUpWindow,
            other => other,
        }
    }
}

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse event
    Mouse(MouseEvent),
    /// Touch event (mobile/touchscreen)
    Touch(TouchEvent),
    /// Keyboard event
    Keyboard(KeyboardEvent),
    /// Scroll wheel or trackpad scroll
    Wheel(WheelEvent),
    /// The map lost focus
    Blur {
        /// Milliseconds on the host clock
        time_stamp: f64,
    },
    /// Frame tick synthesized by the frame scheduler
    RenderFrame {
        /// Milliseconds on the host clock
        time_stamp: f64,
    },
}

impl InputEvent {
    /// Create a render frame tick
    pub fn render_frame(time_stamp: f64) -> Self {
        InputEvent::RenderFrame { time_stamp }
    }

    /// Host timestamp in milliseconds
    pub fn time_stamp(&self) -> f64 {
        match self {
            InputEvent::Mouse(e) => e.time_stamp,
            InputEvent::Touch(e) => e.time_stamp,
            InputEvent::Keyboard(e) => e.time_stamp,
            InputEvent::Wheel(e) => e.time_stamp,
            InputEvent::Blur { time_stamp } | InputEvent::RenderFrame { time_stamp } => {
                *time_stamp
            }
        }
    }

    /// Dispatch name of this event
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::Mouse(e) => match e.kind {
                MouseEventKind::Down => InputKind::MouseDown,
                MouseEventKind::Move => InputKind::MouseMove,
                MouseEventKind::Up => InputKind::MouseUp,
                MouseEventKind::Over => InputKind::MouseOver,
                MouseEventKind::Out => InputKind::MouseOut,
                MouseEventKind::Click => InputKind::Click,
                MouseEventKind::DoubleClick => InputKind::DoubleClick,
                MouseEventKind::ContextMenu => InputKind::ContextMenu,
            },
            InputEvent::Touch(e) => match e.phase {
                TouchPhase::Start => InputKind::TouchStart,
                TouchPhase::Move => InputKind::TouchMove,
                TouchPhase::End => InputKind::TouchEnd,
                TouchPhase::Cancel => InputKind::TouchCancel,
            },
            InputEvent::Keyboard(e) => match e.state {
                KeyState::Pressed => InputKind::KeyDown,
                KeyState::Released => InputKind::KeyUp,
            },
            InputEvent::Wheel(_) => InputKind::Wheel,
            InputEvent::Blur { .. } => InputKind::Blur,
            InputEvent::RenderFrame { .. } => InputKind::RenderFrame,
        }
    }

    pub fn is_render_frame(&self) -> bool {
        matches!(self, InputEvent::RenderFrame { .. })
    }

    /// Modifier keys held during this event, if the event carries them
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            InputEvent::Mouse(e) => Some(e.modifiers),
            InputEvent::Keyboard(e) => Some(e.modifiers),
            InputEvent::Wheel(e) => Some(e.modifiers),
            _ => None,
        }
    }
}

// ============================================================================
// Mouse Events
// ============================================================================

/// What happened to the mouse
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down,
    Move,
    Up,
    /// Pointer entered the map container
    Over,
    /// Pointer left the map container
    Out,
    Click,
    DoubleClick,
    ContextMenu,
}

/// Mouse event with container-relative position
#[derive(Clone, Debug, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Button that changed state (Left for moves)
    pub button: MouseButton,
    /// X position relative to the map container
    pub x: f64,
    /// Y position relative to the map container
    pub y: f64,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
    /// Milliseconds on the host clock
    pub time_stamp: f64,
}

impl MouseEvent {
    /// Create a left-button event with no modifiers
    pub fn new(kind: MouseEventKind, x: f64, y: f64, time_stamp: f64) -> Self {
        Self {
            kind,
            button: MouseButton::Left,
            x,
            y,
            modifiers: Modifiers::default(),
            time_stamp,
        }
    }

    /// Builder: set the button
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Builder: set the modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Other button with index
    Other(u16),
}

// ============================================================================
// Wheel Events
// ============================================================================

/// Unit of wheel deltas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// Scroll wheel or trackpad scroll
#[derive(Clone, Debug, PartialEq)]
pub struct WheelEvent {
    /// Horizontal scroll delta
    pub delta_x: f64,
    /// Vertical scroll delta
    pub delta_y: f64,
    pub delta_mode: WheelDeltaMode,
    /// Pointer position relative to the map container
    pub x: f64,
    pub y: f64,
    pub modifiers: Modifiers,
    /// Milliseconds on the host clock
    pub time_stamp: f64,
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
    /// Milliseconds on the host clock
    pub time_stamp: f64,
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Key codes relevant to map navigation
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Arrow keys
    Left,
    Right,
    Up,
    Down,

    // Zoom keys
    Minus,
    Equals,
    PageUp,
    PageDown,
    Home,
    End,

    Escape,

    // Modifier keys (for tracking state)
    Shift,
    Ctrl,
    Alt,
    Meta,

    // Character input
    Char(char),

    // Unknown key
    Unknown,
}

// ============================================================================
// Touch Events
// ============================================================================

/// Touch gesture phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single active touch point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    /// Unique identifier for this touch
    pub id: u64,
    /// X position relative to the map container
    pub x: f64,
    /// Y position relative to the map container
    pub y: f64,
    /// Whether the touch started on the map container (rather than on an
    /// overlay outside of it)
    pub on_map: bool,
}

impl Touch {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            on_map: true,
        }
    }
}

/// Touch events for touchscreens
///
/// `touches` lists every touch still in contact after this event, like the
/// DOM `TouchEvent.touches` list.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: SmallVec<[Touch; 4]>,
    /// Milliseconds on the host clock
    pub time_stamp: f64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: impl IntoIterator<Item = Touch>, time_stamp: f64) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
            time_stamp,
        }
    }
}
