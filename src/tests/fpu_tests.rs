//   Copyright 2026 Martin Åkesson
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.

//! Unit tests for the FPU contract.

use crate::fpu::{self, BinaryOp, RoundingMode, UnaryOp, FPCSR_DIVBYZERO, FPCSR_INVALID};

#[test]
fn perform_binary_add() {
    let mut fpcsr = 0u32;
    let mut dst = 0.0f32;
    fpu::perform_binary(&mut fpcsr, &mut dst, 1.5, 2.5, BinaryOp::Add);
    assert_eq!(dst, 4.0);
    assert_eq!(fpcsr, 0);
}

#[test]
fn divide_by_zero_sets_sticky_flag_without_trapping() {
    let mut fpcsr = 0u32;
    let mut dst = 0.0f32;
    fpu::perform_binary(&mut fpcsr, &mut dst, 1.0, 0.0, BinaryOp::Div);
    assert!(dst.is_infinite());
    assert_eq!(fpcsr & FPCSR_DIVBYZERO, FPCSR_DIVBYZERO);
}

#[test]
fn sqrt_of_negative_sets_invalid() {
    let mut fpcsr = 0u32;
    let mut dst = 0.0f32;
    fpu::perform_unary(&mut fpcsr, &mut dst, -1.0, UnaryOp::Sqrt);
    assert!(dst.is_nan());
    assert_eq!(fpcsr & FPCSR_INVALID, FPCSR_INVALID);
}

#[test]
fn rounding_mode_from_fpcsr() {
    assert_eq!(RoundingMode::from_fpcsr(0b00 << 5), RoundingMode::Nearest);
    assert_eq!(RoundingMode::from_fpcsr(0b01 << 5), RoundingMode::Down);
    assert_eq!(RoundingMode::from_fpcsr(0b10 << 5), RoundingMode::Up);
    assert_eq!(RoundingMode::from_fpcsr(0b11 << 5), RoundingMode::TowardZero);
}

#[test]
fn fcvti_then_fcvtf_round_trips_an_integer_payload() {
    let mut fpcsr = 0u32;
    let mut as_float_slot = 0.0f32;
    fpu::fcvti(&mut fpcsr, &mut as_float_slot, 3.0);
    assert_eq!(as_float_slot.to_bits(), 3u32);

    let mut back = 0.0f32;
    fpu::fcvtf(&mut back, as_float_slot);
    assert_eq!(back, 3.0);
}

#[test]
fn fcvti_out_of_range_sets_invalid() {
    let mut fpcsr = 0u32;
    let mut dst = 0.0f32;
    fpu::fcvti(&mut fpcsr, &mut dst, 1e20);
    assert_eq!(fpcsr & FPCSR_INVALID, FPCSR_INVALID);
}
