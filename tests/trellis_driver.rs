#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the seesaw/NeoTrellis driver against a fake I2C bus.

use std::collections::HashMap;

use embassy_futures::block_on;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use trellis_noise::Error;
use trellis_noise::config::Brightness;
use trellis_noise::controls::{Edge, KeyEvent};
use trellis_noise::frame::{MatrixFrame, RGB8};
use trellis_noise::trellis::neotrellis::{
    decode_event, key_activation, panel_to_seesaw_key, seesaw_to_panel_key,
};
use trellis_noise::trellis::{KeyEvents, KeyPad, LedMatrix, MultiTrellis, PanelKey};

// ============================================================================
// Fakes
// ============================================================================

/// Records every write and answers reads from the register selected last.
#[derive(Default)]
struct FakeBus {
    writes: Vec<(u8, Vec<u8>)>,
    hardware_id: u8,
    fifo: HashMap<u8, Vec<u8>>,
    selected: HashMap<u8, (u8, u8)>,
    fail: bool,
}

impl FakeBus {
    fn with_hardware_id(hardware_id: u8) -> Self {
        Self {
            hardware_id,
            ..Self::default()
        }
    }

    fn answer(&mut self, address: u8, buffer: &mut [u8]) {
        buffer.fill(0xFF);
        match self.selected.get(&address).copied() {
            Some((0x00, 0x01)) => buffer[0] = self.hardware_id,
            Some((0x10, 0x04)) => {
                buffer[0] = self.fifo.get(&address).map_or(0, |events| events.len() as u8);
            }
            Some((0x10, 0x10)) => {
                let events = self.fifo.remove(&address).unwrap_or_default();
                for (slot, raw) in buffer.iter_mut().zip(events) {
                    *slot = raw;
                }
            }
            _ => {}
        }
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let mut written = Vec::new();
        for operation in operations {
            match operation {
                Operation::Write(bytes) => written.extend_from_slice(bytes),
                Operation::Read(buffer) => self.answer(address, buffer),
            }
        }
        if written.len() == 2 {
            self.selected.insert(address, (written[0], written[1]));
        }
        if !written.is_empty() {
            self.writes.push((address, written));
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeDelay {
    total_ns: u64,
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

type Trellis = MultiTrellis<FakeBus, FakeDelay>;

fn trellis(bus: FakeBus) -> Trellis {
    MultiTrellis::new(bus, FakeDelay::default())
}

// ============================================================================
// Key numbering
// ============================================================================

#[test]
fn panel_and_seesaw_key_numbers_round_trip() {
    for key in 0..16u8 {
        assert_eq!(seesaw_to_panel_key(panel_to_seesaw_key(key)), Some(key));
    }
    assert_eq!(panel_to_seesaw_key(5), 9);
    assert_eq!(panel_to_seesaw_key(15), 27);
    assert_eq!(seesaw_to_panel_key(4), None);
}

#[test]
fn matrix_keys_map_to_panels() {
    assert_eq!(
        PanelKey::from_matrix_key(7),
        Ok(PanelKey {
            panel_row: 0,
            panel_column: 1,
            key: 3
        })
    );
    assert_eq!(
        PanelKey::from_matrix_key(36),
        Ok(PanelKey {
            panel_row: 1,
            panel_column: 1,
            key: 0
        })
    );
    for matrix_key in 0..64u8 {
        let location = PanelKey::from_matrix_key(matrix_key).expect("key is on the matrix");
        assert_eq!(location.matrix_key(), matrix_key);
    }
    assert_eq!(PanelKey::from_matrix_key(64), Err(Error::KeyOutOfRange(64)));
}

#[test]
fn fifo_bytes_decode_to_panel_keys_and_edges() {
    assert_eq!(decode_event(0xFF), None);
    assert_eq!(decode_event(0x03), Some((0, Edge::Rising)));
    assert_eq!(decode_event((9 << 2) | 2), Some((5, Edge::Falling)));
    // Seesaw column 4 has no key on a 4x4 panel.
    assert_eq!(decode_event((4 << 2) | 3), None);
    assert_eq!(key_activation(Edge::Rising, true), 0x11);
    assert_eq!(key_activation(Edge::Falling, false), 0x08);
}

// ============================================================================
// Begin
// ============================================================================

#[test]
fn begin_sets_up_every_panel_and_key() {
    let mut trellis = trellis(FakeBus::with_hardware_id(0x55));
    block_on(trellis.begin()).expect("begin succeeds");
    let (bus, delay) = trellis.release();

    let first_panel: Vec<_> = bus.writes.iter().take(6).cloned().collect();
    assert_eq!(
        first_panel,
        vec![
            (0x30, vec![0x00, 0x7F, 0xFF]),
            (0x30, vec![0x00, 0x01]),
            (0x30, vec![0x0E, 0x02, 0x01]),
            (0x30, vec![0x0E, 0x03, 0x00, 0x30]),
            (0x30, vec![0x0E, 0x01, 0x03]),
            (0x30, vec![0x10, 0x02, 0x01]),
        ]
    );
    let panel_order: Vec<u8> = bus.writes.iter().step_by(6).take(4).map(|(a, _)| *a).collect();
    assert_eq!(panel_order, vec![0x30, 0x2F, 0x32, 0x31]);

    let activations = &bus.writes[24..];
    assert_eq!(activations.len(), 64);
    assert_eq!(activations[0], (0x30, vec![0x10, 0x01, 0, 0x11]));
    assert_eq!(activations[7], (0x2F, vec![0x10, 0x01, 3, 0x11]));
    assert_eq!(activations[63], (0x31, vec![0x10, 0x01, 27, 0x11]));

    // Four resets (10 ms each) plus four id reads (250 us each).
    assert_eq!(delay.total_ns, 4 * 10_000_000 + 4 * 250_000);
}

#[test]
fn begin_rejects_unknown_hardware_id() {
    let mut trellis = trellis(FakeBus::with_hardware_id(0x42));
    assert_eq!(
        block_on(trellis.begin()),
        Err(Error::UnknownHardwareId {
            address: 0x30,
            found: 0x42
        })
    );
}

#[test]
fn bus_failures_surface_as_i2c_errors() {
    let mut trellis = trellis(FakeBus {
        fail: true,
        ..FakeBus::default()
    });
    assert_eq!(
        block_on(trellis.begin()),
        Err(Error::I2c(ErrorKind::NoAcknowledge(
            NoAcknowledgeSource::Address
        )))
    );
    assert!(block_on(trellis.show()).is_err());
}

// ============================================================================
// Frames
// ============================================================================

#[test]
fn write_frame_sends_scaled_grb_to_the_right_panel() {
    let mut frame = MatrixFrame::new();
    frame[(4, 0)] = RGB8::new(10, 20, 30);

    let mut trellis = trellis(FakeBus::default());
    trellis.set_brightness(Brightness::new(128));
    block_on(trellis.write_frame(&frame)).expect("write succeeds");
    let (bus, _) = trellis.release();

    // Two 8-pixel chunks per panel.
    assert_eq!(bus.writes.len(), 8);
    let (address, bytes) = &bus.writes[2];
    assert_eq!(*address, 0x2F);
    assert_eq!(bytes.len(), 2 + 2 + 8 * 3);
    assert_eq!(&bytes[..7], &[0x0E, 0x04, 0x00, 0x00, 10, 5, 15]);
    assert!(bytes[7..].iter().all(|&byte| byte == 0));

    let (address, bytes) = &bus.writes[3];
    assert_eq!(*address, 0x2F);
    assert_eq!(&bytes[..4], &[0x0E, 0x04, 0x00, 24]);
}

#[test]
fn full_brightness_leaves_colors_unchanged() {
    let frame = MatrixFrame::filled(RGB8::new(1, 2, 255));
    let mut trellis = trellis(FakeBus::default());
    trellis.set_brightness(Brightness::MAX);
    block_on(trellis.write_frame(&frame)).expect("write succeeds");
    let (bus, _) = trellis.release();
    assert_eq!(&bus.writes[0].1[4..7], &[2, 1, 255]);
}

#[test]
fn show_latches_every_panel() {
    let mut trellis = trellis(FakeBus::default());
    block_on(trellis.show()).expect("show succeeds");
    let (bus, _) = trellis.release();
    assert_eq!(
        bus.writes,
        vec![
            (0x30, vec![0x0E, 0x05]),
            (0x2F, vec![0x0E, 0x05]),
            (0x32, vec![0x0E, 0x05]),
            (0x31, vec![0x0E, 0x05]),
        ]
    );
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn poll_reports_matrix_keys_in_panel_order() {
    let mut bus = FakeBus::default();
    bus.fifo.insert(0x32, vec![(9 << 2) | 2, (4 << 2) | 3]);
    bus.fifo.insert(0x2F, vec![0x03]);
    let mut trellis = trellis(bus);

    let mut events = KeyEvents::new();
    block_on(trellis.poll(&mut events)).expect("poll succeeds");
    assert_eq!(
        events.as_slice(),
        &[
            KeyEvent::pressed(4),
            KeyEvent {
                key: 41,
                edge: Edge::Falling
            },
        ]
    );

    // The FIFOs were drained.
    events.clear();
    block_on(trellis.poll(&mut events)).expect("poll succeeds");
    assert!(events.is_empty());
}
