//! Screen geometry for the watchface.
//!
//! The face draws six regions on a single window. Positions differ slightly
//! between rectangular and round displays so the status icons stay inside the
//! visible circle.
//!
//! ```text
//!  rect (144x168)                 round (180x180)
//! ┌──────────────────┐            ╭──────────────────╮
//! │BT   ⚡     100%  │            │     BT  ⚡  100%  │
//! │                  │            │                  │
//! │      12:34       │            │      12:34       │
//! │                  │            │                  │
//! │ Mon 05 Jan 2026  │            │    Mon 05 Jan    │
//! └──────────────────┘            ╰──────────────────╯
//! ```

use serde::{Deserialize, Serialize};

/// Rectangular display width in pixels
pub const RECT_WIDTH: u16 = 144;

/// Rectangular display height in pixels
pub const RECT_HEIGHT: u16 = 168;

/// Round display diameter in pixels
pub const ROUND_DIAMETER: u16 = 180;

/// Text shown in the time region before the first frame is rendered
pub const TIME_PLACEHOLDER: &str = "00:00";

/// Physical display shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Rectangular display (144x168)
    #[default]
    Rect,
    /// Round display (180x180)
    Round,
}

impl Shape {
    /// Screen bounds `(width, height)` for this shape.
    pub fn bounds(self) -> (u16, u16) {
        match self {
            Shape::Rect => (RECT_WIDTH, RECT_HEIGHT),
            Shape::Round => (ROUND_DIAMETER, ROUND_DIAMETER),
        }
    }

    /// Whether the date should omit the year by default.
    ///
    /// The full date does not fit the round display's date row.
    pub fn compact_date(self) -> bool {
        matches!(self, Shape::Round)
    }
}

/// A drawable region of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Full-screen black background
    Background,
    /// Large centered `HH:MM`
    Time,
    /// Charging bolt, shown while plugged in
    ChargeIcon,
    /// Battery percentage text
    Battery,
    /// Bluetooth-disconnected icon
    BluetoothIcon,
    /// Weekday, day, month and (optionally) year
    Date,
}

impl Region {
    /// All regions in creation order (back to front).
    pub const ALL: [Region; 6] = [
        Region::Background,
        Region::Time,
        Region::ChargeIcon,
        Region::Battery,
        Region::BluetoothIcon,
        Region::Date,
    ];
}

/// Bitmap resources the face can place in an icon region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Lightning bolt
    Charge,
    /// Crossed-out Bluetooth rune
    NoBluetooth,
}

/// Rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Left edge
    pub x: i16,
    /// Top edge
    pub y: i16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Frame {
    /// Rectangle at `(x, y)` of size `w` x `h`.
    pub const fn new(x: i16, y: i16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }
}

/// Computed frames for every region on a given display shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Display outline
    pub shape: Shape,
    /// Screen width in pixels
    pub width: u16,
    /// Screen height in pixels
    pub height: u16,
}

impl Layout {
    /// Create the layout for a display shape.
    pub fn for_shape(shape: Shape) -> Self {
        let (width, height) = shape.bounds();
        Self {
            shape,
            width,
            height,
        }
    }

    /// Frame of a region.
    pub fn frame(&self, region: Region) -> Frame {
        let round = self.shape == Shape::Round;
        let w = self.width;
        match region {
            Region::Background => Frame::new(0, 0, w, self.height),
            Region::Time => Frame::new(0, 50, w, 50),
            Region::ChargeIcon if round => Frame::new(80, 12, 20, 20),
            Region::ChargeIcon => Frame::new(85, 2, 20, 20),
            Region::Battery if round => Frame::new(90, 20, 54, 20),
            Region::Battery => Frame::new(90, 0, 54, 20),
            Region::BluetoothIcon if round => Frame::new(40, 22, 20, 20),
            Region::BluetoothIcon => Frame::new(0, 2, 20, 20),
            Region::Date => Frame::new(0, 130, w, 30),
        }
    }

    /// Text a region shows right after creation, if it is a text region.
    pub fn placeholder(region: Region) -> Option<&'static str> {
        match region {
            Region::Time => Some(TIME_PLACEHOLDER),
            Region::Battery | Region::Date => Some(""),
            _ => None,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_shape(Shape::default())
    }
}
