//! # zen_pad
//!
//! Desktop stand-in for the touch panel running the zen ball mode.  The
//! mouse plays the role of the touch screen; notes go to a real MIDI output
//! port when one is available, and nowhere otherwise.
//!
//! ## Panel buttons
//!
//! | Button | Action |
//! |---|---|
//! | BACK | Leave the mode and close the window |
//! | ADD | Add a ball (up to five) |
//! | RESET | Fresh balls, fresh zones |
//! | OCT- / OCT+ | Octave down / up, 2 to 7 |
//!
//! ## Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `S` | Next scale |
//! | `Q` / `Escape` | Quit |

pub mod touch;
pub mod visualizer;
pub mod app;
