//! End-to-end control loop on emulated hardware
//!
//! touch controller -> sampler -> mapper -> frame buffer -> selective
//! flush -> ILI9341 -> emulated panel memory

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use boxel_core::calibration::CoordinateMapper;
use boxel_core::canvas::{Color, FlushStatus, FrameBuffer, UpdateScheduler, HEIGHT, WIDTH};
use boxel_core::config::TouchConfig;
use boxel_core::touch::{TouchSampler, TouchStatus};
use boxel_core::Point;
use boxel_drivers::display::ili9341::cmd;
use boxel_drivers::display::Ili9341;
use boxel_drivers::touch::msp2807::cmd as touch_cmd;
use boxel_drivers::touch::Msp2807;
use boxel_hal::delay::NoDelay;
use boxel_hal::{InputPin, Monotonic, OutputPin, SpiBus};
use proptest::prelude::*;

// ---------------------------------------------------------------------
// Emulated ILI9341 frame memory
// ---------------------------------------------------------------------

struct Panel {
    cs_low: bool,
    dc_high: bool,
    command: u8,
    params: Vec<u8>,
    window: [usize; 4],
    cursor: usize,
    memory: Vec<u16>,
    ramwr_bytes: usize,
}

impl Panel {
    fn new() -> Self {
        Self {
            cs_low: false,
            dc_high: true,
            command: 0,
            params: Vec::new(),
            window: [0; 4],
            cursor: 0,
            memory: vec![0xAAAA; WIDTH * HEIGHT],
            ramwr_bytes: 0,
        }
    }

    fn receive(&mut self, data: &[u8]) {
        assert!(self.cs_low, "SPI write without chip select");

        if !self.dc_high {
            for &byte in data {
                self.command = byte;
                self.params.clear();
                self.cursor = 0;
            }
            return;
        }

        match self.command {
            cmd::CASET | cmd::PASET => {
                self.params.extend_from_slice(data);
                if self.params.len() == 4 {
                    let start = usize::from(u16::from_be_bytes([self.params[0], self.params[1]]));
                    let end = usize::from(u16::from_be_bytes([self.params[2], self.params[3]]));
                    let base = if self.command == cmd::CASET { 0 } else { 2 };
                    self.window[base] = start;
                    self.window[base + 1] = end;
                }
            }
            cmd::RAMWR => {
                assert_eq!(data.len() % 2, 0);
                self.ramwr_bytes += data.len();
                let [x0, x1, y0, _] = self.window;
                let width = x1 - x0 + 1;
                for pixel in data.chunks_exact(2) {
                    let x = x0 + self.cursor % width;
                    let y = y0 + self.cursor / width;
                    self.memory[y * WIDTH + x] = u16::from_be_bytes([pixel[0], pixel[1]]);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }

    fn pixel(&self, x: usize, y: usize) -> u16 {
        self.memory[y * WIDTH + x]
    }
}

type SharedPanel = Rc<RefCell<Panel>>;

struct PanelSpi(SharedPanel);

impl SpiBus for PanelSpi {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        self.0.borrow_mut().receive(data);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), ()> {
        buf.fill(0);
        Ok(())
    }
}

struct PanelCs(SharedPanel);

impl OutputPin for PanelCs {
    fn set_high(&mut self) {
        self.0.borrow_mut().cs_low = false;
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().cs_low = true;
    }
}

struct PanelDc(SharedPanel);

impl OutputPin for PanelDc {
    fn set_high(&mut self) {
        self.0.borrow_mut().dc_high = true;
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().dc_high = false;
    }
}

struct NullPin;

impl OutputPin for NullPin {
    fn set_high(&mut self) {}
    fn set_low(&mut self) {}
}

type Display = Ili9341<PanelSpi, PanelCs, PanelDc, NoDelay>;

fn display() -> (Display, SharedPanel) {
    let panel = Rc::new(RefCell::new(Panel::new()));
    let mut display = Ili9341::new(
        PanelSpi(panel.clone()),
        PanelCs(panel.clone()),
        PanelDc(panel.clone()),
        NoDelay,
    );
    display.init(&mut NullPin).unwrap();
    (display, panel)
}

/// Colour the panel should show for every pixel of `fb`
fn assert_panel_matches(fb: &FrameBuffer, panel: &Panel) {
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let attr = fb.attr(x / 8, y / 8).unwrap();
            let expected = attr.color_for(fb.pixel(x as i32, y as i32)).rgb565();
            assert_eq!(panel.pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

// ---------------------------------------------------------------------
// Emulated touch controller
// ---------------------------------------------------------------------

#[derive(Default)]
struct Finger {
    pressed: bool,
    x: u8,
    y: u8,
    last_cmd: u8,
}

type SharedFinger = Rc<RefCell<Finger>>;

struct TouchSpi(SharedFinger);

impl SpiBus for TouchSpi {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        if let Some(&last) = data.last() {
            self.0.borrow_mut().last_cmd = last;
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), ()> {
        let finger = self.0.borrow();
        let value = match finger.last_cmd {
            touch_cmd::READ_X => finger.x,
            touch_cmd::READ_Y => finger.y,
            _ => 0,
        };
        buf.fill(value);
        Ok(())
    }
}

struct PenIrq(SharedFinger);

impl InputPin for PenIrq {
    fn is_high(&mut self) -> bool {
        !self.0.borrow().pressed
    }
}

struct SharedClock(Rc<Cell<u64>>);

impl Monotonic for SharedClock {
    fn now_us(&mut self) -> u64 {
        self.0.get()
    }
}

type Touch = Msp2807<TouchSpi, NullPin, PenIrq, NoDelay>;

fn touch() -> (TouchSampler<Touch, SharedClock>, SharedFinger, Rc<Cell<u64>>) {
    let finger = SharedFinger::default();
    let clock = Rc::new(Cell::new(0));
    let controller = Msp2807::new(
        TouchSpi(finger.clone()),
        NullPin,
        PenIrq(finger.clone()),
        NoDelay,
    );
    let sampler = TouchSampler::new(
        controller,
        SharedClock(clock.clone()),
        TouchConfig::default(),
    )
    .unwrap();
    (sampler, finger, clock)
}

/// screen = (raw_x - 10, 2 * raw_y)
fn mapper() -> CoordinateMapper {
    let reference = [Point::new(0, 0), Point::new(240, 0), Point::new(0, 300)];
    let samples = [Point::new(10, 0), Point::new(250, 0), Point::new(10, 150)];
    CoordinateMapper::from_points(&reference, &samples).unwrap()
}

// ---------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------

#[test]
fn initial_paint_fills_panel() {
    let (mut display, panel) = display();
    let mut fb = FrameBuffer::default();
    fb.put_string("BOXEL", 0, 40, Color::Blue, Color::Yellow);

    UpdateScheduler::new().full_flush(&mut fb, &mut display).unwrap();

    assert_eq!(fb.dirty_count(), 0);
    assert_eq!(panel.borrow().ramwr_bytes, WIDTH * HEIGHT * 2);
    assert_panel_matches(&fb, &panel.borrow());
}

#[test]
fn touch_draws_through_to_panel() {
    let (mut display, panel) = display();
    let (mut sampler, finger, clock) = touch();
    let mapper = mapper();

    let mut fb = FrameBuffer::default();
    let mut scheduler = UpdateScheduler::new();
    scheduler.full_flush(&mut fb, &mut display).unwrap();

    // Idle tick: nothing happens
    assert_eq!(sampler.poll(), Ok(TouchStatus::Released));

    {
        let mut finger = finger.borrow_mut();
        finger.pressed = true;
        finger.x = 60;
        finger.y = 50;
    }

    let mut drawn = Vec::new();
    for _ in 0..5 {
        clock.set(clock.get() + 2_000);
        sampler.poll().unwrap();
        if let Some(sample) = sampler.take_sample() {
            let p = mapper.map_sample(&sample);
            fb.set_pixel(p.x, p.y, Color::Black, Color::Yellow);
            drawn.push(p);
        }
        let report = scheduler.selective_flush(&mut fb, &mut display, 4).unwrap();
        assert_eq!(report.status, FlushStatus::Complete);
    }

    // Constant finger: the filter stays on the snapped position
    assert_eq!(drawn.len(), 5);
    assert!(drawn.iter().all(|p| *p == Point::new(50, 100)));

    let panel = panel.borrow();
    assert_eq!(panel.pixel(50, 100), Color::Yellow.rgb565());
    assert_eq!(panel.pixel(51, 100), Color::Black.rgb565());
    assert_panel_matches(&fb, &panel);
}

#[test]
fn budgeted_flush_catches_up() {
    let (mut display, panel) = display();
    let mut fb = FrameBuffer::default();
    let mut scheduler = UpdateScheduler::new();
    scheduler.full_flush(&mut fb, &mut display).unwrap();

    fb.print(
        0,
        40,
        Color::Black,
        Color::Green,
        format_args!("cal {} {}\n", 12, -7),
    );
    fb.draw_line(0, 319, 239, 200);
    fb.put_text_label("OK", 101, 203, true);
    let dirty = fb.dirty_count();
    assert!(dirty > 8);

    let mut calls = 0;
    let mut written = 0;
    loop {
        calls += 1;
        let report = scheduler.selective_flush(&mut fb, &mut display, 8).unwrap();
        written += report.blocks_written;
        if report.status == FlushStatus::Complete {
            break;
        }
        assert_eq!(report.blocks_written, 8);
    }

    assert_eq!(written, dirty);
    assert_eq!(calls, dirty.div_ceil(8));
    assert_panel_matches(&fb, &panel.borrow());
}

#[test]
fn release_and_new_contact_snaps() {
    let (mut sampler, finger, clock) = touch();
    let mapper = mapper();

    finger.borrow_mut().pressed = true;
    finger.borrow_mut().x = 110;
    finger.borrow_mut().y = 20;
    sampler.poll().unwrap();
    let first = mapper.map_sample(&sampler.take_sample().unwrap());
    assert_eq!(first, Point::new(100, 40));

    finger.borrow_mut().pressed = false;
    clock.set(clock.get() + 1_000);
    assert_eq!(sampler.poll(), Ok(TouchStatus::Released));

    finger.borrow_mut().pressed = true;
    finger.borrow_mut().x = 30;
    finger.borrow_mut().y = 140;
    clock.set(clock.get() + 60_000);
    assert_eq!(sampler.poll(), Ok(TouchStatus::Sampled));
    let second = mapper.map_sample(&sampler.take_sample().unwrap());
    assert_eq!(second, Point::new(20, 280));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn single_pixel_costs_one_block(x in 0..WIDTH as i32, y in 0..HEIGHT as i32) {
        let (mut display, panel) = display();
        let mut fb = FrameBuffer::default();
        let mut scheduler = UpdateScheduler::new();
        scheduler.full_flush(&mut fb, &mut display).unwrap();
        let before = panel.borrow().ramwr_bytes;

        fb.set_pixel(x, y, Color::Blue, Color::Red);
        let report = scheduler.selective_flush(&mut fb, &mut display, usize::MAX).unwrap();

        prop_assert_eq!(report.blocks_written, 1);
        prop_assert_eq!(panel.borrow().ramwr_bytes - before, 128);
        prop_assert_eq!(panel.borrow().pixel(x as usize, y as usize), Color::Red.rgb565());
    }
}
