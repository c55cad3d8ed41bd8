//! Carousel Animation
//!
//! Spring physics and a headless [`TrackPresenter`] that implements
//! [`carousel_core::PresentationAdapter`]:
//!
//! - **Springs**: RK4-integrated, retargetable mid-flight
//! - **Track**: Animated or instant slides, transitions off while dragging
//! - **Thumbnail Strip**: Keeps the selected thumbnail centred
//!
//! # Example
//!
//! ```rust
//! use carousel_animation::TrackPresenter;
//! use carousel_core::{CarouselConfig, NavigateOptions, NavigationController};
//!
//! let mut carousel = NavigationController::new(
//!     CarouselConfig::default(),
//!     TrackPresenter::default(),
//! );
//! carousel.load(3);
//! carousel.move_by(1, NavigateOptions::animated());
//!
//! let track = carousel.presenter_mut();
//! track.settle(1.0 / 60.0, 600);
//! assert_eq!(track.track_offset(), -400.0);
//! ```

pub mod presenter;
pub mod spring;

pub use presenter::{TrackLayout, TrackPresenter};
pub use spring::{Spring, SpringConfig};
