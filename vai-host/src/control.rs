//! Closed set of host control queries.
//!
//! Hosts query playback position in their own units: normalized
//! `[0, 1]` position and microsecond timestamps. Each query is a tagged
//! variant resolved by pattern matching; there is no open-ended query
//! code to interpret.

use vai_decoder::Session;

const MICROS_PER_MS: u64 = 1_000;

/// A control query the host can issue against an open session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRequest {
    /// Current position as a fraction of the stream, in `[0, 1]`.
    GetPosition,
    /// Seek to a fraction of the stream.
    SetPosition(f64),
    /// Stream length in microseconds.
    GetLength,
    /// Current position in microseconds.
    GetTime,
    /// Seek to a microsecond timestamp.
    SetTime(i64),
}

/// The answer to a [`ControlRequest`]; seeks answer with `Done`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlResponse {
    Position(f64),
    Length(i64),
    Time(i64),
    Done,
}

// Host times are signed microseconds; millisecond values near u64::MAX
// still come from parseable headers, so clamp rather than wrap.
fn ms_to_micros(ms: u64) -> i64 {
    i64::try_from(ms.saturating_mul(MICROS_PER_MS)).unwrap_or(i64::MAX)
}

pub(crate) fn dispatch(session: &mut Session, request: ControlRequest) -> ControlResponse {
    let meta = *session.metadata();
    match request {
        ControlRequest::GetPosition => {
            let position = if meta.total_frames == 0 {
                0.0
            } else {
                session.current_frame() as f64 / meta.total_frames as f64
            };
            ControlResponse::Position(position)
        }
        ControlRequest::SetPosition(position) => {
            let position = position.clamp(0.0, 1.0);
            let frame = (position * meta.total_frames as f64) as u64;
            session.seek_to_frame(frame);
            ControlResponse::Done
        }
        ControlRequest::GetLength => ControlResponse::Length(ms_to_micros(meta.duration_ms)),
        ControlRequest::GetTime => ControlResponse::Time(ms_to_micros(session.current_time_ms())),
        ControlRequest::SetTime(time_us) => {
            session.seek_to_time(time_us.max(0) as u64 / MICROS_PER_MS);
            ControlResponse::Done
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::build_container;

    fn session() -> Session {
        // 90 frames at 30 fps over 3 seconds.
        Session::open(&build_container(90, 3000)).unwrap()
    }

    #[test]
    fn test_get_length_in_micros() {
        let mut s = session();
        assert_eq!(
            dispatch(&mut s, ControlRequest::GetLength),
            ControlResponse::Length(3_000_000)
        );
    }

    #[test]
    fn test_set_time_matches_cursor_conversion() {
        let mut s = session();
        assert_eq!(
            dispatch(&mut s, ControlRequest::SetTime(1_000_000)),
            ControlResponse::Done
        );
        assert_eq!(s.current_frame(), 30);
        assert_eq!(
            dispatch(&mut s, ControlRequest::GetTime),
            ControlResponse::Time(1_000_000)
        );
    }

    #[test]
    fn test_negative_time_clamps_to_start() {
        let mut s = session();
        s.seek_to_frame(10);
        dispatch(&mut s, ControlRequest::SetTime(-5));
        assert_eq!(s.current_frame(), 0);
    }

    #[test]
    fn test_position_round_trip() {
        let mut s = session();
        dispatch(&mut s, ControlRequest::SetPosition(0.5));
        assert_eq!(s.current_frame(), 45);
        assert_eq!(
            dispatch(&mut s, ControlRequest::GetPosition),
            ControlResponse::Position(0.5)
        );
    }

    #[test]
    fn test_position_clamps() {
        let mut s = session();
        dispatch(&mut s, ControlRequest::SetPosition(7.0));
        assert_eq!(s.current_frame(), 89);
        dispatch(&mut s, ControlRequest::SetPosition(-1.0));
        assert_eq!(s.current_frame(), 0);
    }

    #[test]
    fn test_length_clamps_for_extreme_duration() {
        // duration_ms near u64::MAX is parseable; the microsecond
        // length must clamp to i64::MAX instead of wrapping negative.
        let mut s = Session::open(&build_container(1, u64::MAX)).unwrap();
        assert_eq!(
            dispatch(&mut s, ControlRequest::GetLength),
            ControlResponse::Length(i64::MAX)
        );
    }

    #[test]
    fn test_position_on_empty_stream() {
        let mut s = Session::open(&build_container(0, 0)).unwrap();
        assert_eq!(
            dispatch(&mut s, ControlRequest::GetPosition),
            ControlResponse::Position(0.0)
        );
        dispatch(&mut s, ControlRequest::SetPosition(0.5));
        assert_eq!(s.current_frame(), 0);
    }
}
