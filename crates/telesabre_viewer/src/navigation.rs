// Copyright contributors to the TeleSABRE Replay Viewer project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Slider, step buttons, keyboard and autoplay as one state machine.
//!
//! The navigator owns no clock. Starting playback hands out a [`TimerId`];
//! the caller delivers [`Input::Tick`] with that id every interval. Ticks
//! carrying an older id are ignored, which is how a stopped or restarted
//! timer is cancelled.

use std::time::Duration;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Slider moved to a value.
    Seek(usize),
    Prev,
    Next,
    Key(Key),
    TogglePlay,
    SetInterval(Duration),
    Tick(TimerId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    value: usize,
    max: usize,
    interval: Duration,
    timer: Option<TimerId>,
    timers_started: u64,
}

impl Navigator {
    /// Navigator over `iterations` entries, positioned on the first.
    pub fn new(iterations: usize, interval: Duration) -> Self {
        Self {
            value: 0,
            max: iterations.saturating_sub(1),
            interval,
            timer: None,
            timers_started: 0,
        }
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Id of the running timer, if any.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn play(&mut self) -> TimerId {
        self.timers_started += 1;
        let id = TimerId(self.timers_started);
        self.timer = Some(id);
        debug!("Autoplay started every {:?}", self.interval);
        id
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("Autoplay stopped at {}", self.value);
        }
    }

    /// Apply one input. Returns the iteration to render, if the input moved
    /// the position.
    pub fn apply(&mut self, input: Input) -> Option<usize> {
        match input {
            Input::Seek(value) => {
                self.stop();
                Some(self.seek(value))
            }
            Input::Prev | Input::Key(Key::Left) => {
                self.stop();
                Some(self.seek(self.value.saturating_sub(1)))
            }
            Input::Next | Input::Key(Key::Right) => {
                self.stop();
                Some(self.seek(self.value + 1))
            }
            Input::TogglePlay | Input::Key(Key::Space) => {
                if self.is_playing() {
                    self.stop();
                } else {
                    self.play();
                }
                None
            }
            Input::SetInterval(interval) => {
                self.interval = interval;
                if self.is_playing() {
                    self.play();
                }
                None
            }
            Input::Tick(id) => {
                if self.timer != Some(id) {
                    return None;
                }
                let value = self.seek(self.value + 1);
                if value == self.max {
                    self.stop();
                }
                Some(value)
            }
        }
    }

    fn seek(&mut self, value: usize) -> usize {
        self.value = value.min(self.max);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> Navigator {
        Navigator::new(4, Duration::from_millis(500))
    }

    #[test]
    fn steps_clamp_to_range() {
        let mut nav = navigator();
        assert_eq!(Some(0), nav.apply(Input::Prev));
        assert_eq!(Some(1), nav.apply(Input::Key(Key::Right)));
        assert_eq!(Some(3), nav.apply(Input::Seek(10)));
        assert_eq!(Some(3), nav.apply(Input::Next));
        assert_eq!(Some(2), nav.apply(Input::Key(Key::Left)));
    }

    #[test]
    fn autoplay_advances_and_stops_at_end() {
        let mut nav = navigator();
        nav.apply(Input::Seek(1));
        assert_eq!(None, nav.apply(Input::Key(Key::Space)));
        let id = nav.timer().unwrap();
        assert_eq!(Some(2), nav.apply(Input::Tick(id)));
        assert!(nav.is_playing());
        assert_eq!(Some(3), nav.apply(Input::Tick(id)));
        assert!(!nav.is_playing());
        assert_eq!(None, nav.apply(Input::Tick(id)));
    }

    #[test]
    fn manual_navigation_cancels_autoplay() {
        for input in [Input::Seek(2), Input::Prev, Input::Next, Input::Key(Key::Left)] {
            let mut nav = navigator();
            let id = nav.play();
            nav.apply(input);
            assert!(!nav.is_playing(), "{input:?}");
            assert_eq!(None, nav.apply(Input::Tick(id)));
        }
    }

    #[test]
    fn interval_change_restarts_timer() {
        let mut nav = navigator();
        let old = nav.play();
        assert_eq!(None, nav.apply(Input::SetInterval(Duration::from_millis(100))));
        let new = nav.timer().unwrap();
        assert_ne!(old, new);
        assert_eq!(Duration::from_millis(100), nav.interval());
        assert_eq!(None, nav.apply(Input::Tick(old)));
        assert_eq!(Some(1), nav.apply(Input::Tick(new)));
    }

    #[test]
    fn interval_change_while_paused_does_not_start() {
        let mut nav = navigator();
        nav.apply(Input::SetInterval(Duration::from_secs(1)));
        assert!(!nav.is_playing());
    }
}
