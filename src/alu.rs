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

//! ALU (Arithmetic Logic Unit) helpers.
//!
//! Every flagged operation is carried out as if widened to 64 bits so `C`
//! can be read from bit 32 of the unsigned result, per the ALU contract:
//! `Z := low32(result) == 0`, `N := bit31(low32(result))`,
//! `C := result > 0xffffffff`. `V` is reserved and never written here.

use crate::registers::StatusWord;

fn set_flags_from_wide(st: &mut StatusWord, wide: u64) {
    let low = wide as u32;
    st.set_zero(low == 0);
    st.set_negative(low & 0x8000_0000 != 0);
    st.set_carry(wide > 0xffff_ffff);
}

/// ADD (unsigned and signed forms share the same bit result and carry
/// derivation; only the immediate's sign/zero-extension at the call site
/// differs — see DESIGN.md).
pub fn addu(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let wide = src1 as u64 + src2 as u64;
    *dst = wide as u32;
    set_flags_from_wide(st, wide);
}

/// SUB: `dst = src1 - src2`. Widened so a borrow reads back as `C` set.
pub fn subu(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let wide = (src1 as u64).wrapping_sub(src2 as u64);
    *dst = wide as u32;
    set_flags_from_wide(st, wide);
}

/// MUL (unsigned). See `addu` re: signed/unsigned sharing.
pub fn mulu(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let wide = src1 as u64 * src2 as u64;
    *dst = wide as u32;
    set_flags_from_wide(st, wide);
}

/// DIV (unsigned). Division by zero is unspecified but must not abort the
/// core: the quotient is forced to zero, and flags are still written from
/// that (zero) result per the usual rule.
pub fn divu(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let q = src1.checked_div(src2).unwrap_or(0);
    *dst = q;
    set_flags_from_wide(st, q as u64);
}

/// DIV (signed). Same divide-by-zero handling as `divu`; also guards the
/// `i32::MIN / -1` overflow case via `checked_div`.
pub fn divs(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let q = (src1 as i32).checked_div(src2 as i32).unwrap_or(0) as u32;
    *dst = q;
    set_flags_from_wide(st, q as u64);
}

pub fn and(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let r = src1 & src2;
    *dst = r;
    set_flags_from_wide(st, r as u64);
    st.set_carry(false);
}

pub fn or(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let r = src1 | src2;
    *dst = r;
    set_flags_from_wide(st, r as u64);
    st.set_carry(false);
}

pub fn xor(st: &mut StatusWord, dst: &mut u32, src1: u32, src2: u32) {
    let r = src1 ^ src2;
    *dst = r;
    set_flags_from_wide(st, r as u64);
    st.set_carry(false);
}

/// NOT: bitwise complement.
pub fn not(st: &mut StatusWord, dst: &mut u32, src: u32) {
    let r = !src;
    *dst = r;
    set_flags_from_wide(st, r as u64);
    st.set_carry(false);
}

/// NEG: bitwise complement. This is *not* arithmetic negation — the
/// ISA defines `neg` as `~src`; see DESIGN.md for the rationale.
pub fn neg(st: &mut StatusWord, dst: &mut u32, src: u32) {
    not(st, dst, src);
}

/// INC: `dst += amount` (amount is `1 << size` in bytes). Writes flags.
pub fn inc(st: &mut StatusWord, dst: &mut u32, amount: u32) {
    let wide = *dst as u64 + amount as u64;
    *dst = wide as u32;
    set_flags_from_wide(st, wide);
}

/// DEC: `dst -= amount`. Writes flags.
pub fn dec(st: &mut StatusWord, dst: &mut u32, amount: u32) {
    let wide = (*dst as u64).wrapping_sub(amount as u64);
    *dst = wide as u32;
    set_flags_from_wide(st, wide);
}

/// RST: `dst = 0`. Writes flags (Z set, N/C clear).
pub fn rst(st: &mut StatusWord, dst: &mut u32) {
    *dst = 0;
    set_flags_from_wide(st, 0);
}

/// TST: sets `Z` iff bit `bit` of `val` is zero. Does not touch a
/// destination; `C` is left untouched (cleared only by shift/logical ops,
/// not `tst`).
pub fn tst(st: &mut StatusWord, val: u32, bit: u32) {
    let probe = val & (1u32 << (bit & 0x1f));
    st.set_zero(probe == 0);
    st.set_negative(probe & 0x8000_0000 != 0);
}

/// CMP: `src1 - src2`, flags only, no destination write.
pub fn cmp(st: &mut StatusWord, src1: u32, src2: u32) {
    let wide = (src1 as u64).wrapping_sub(src2 as u64);
    set_flags_from_wide(st, wide);
}

/// CMP (byte-masked immediate form used by `cmp.b`): compares against only
/// the low 8 bits of the immediate operand.
pub fn cmpb(st: &mut StatusWord, src1: u32, imm: u32) {
    cmp(st, src1, imm & 0xff);
}

/// CMPZ: `Z` iff `val == 0`, `N` iff bit31 set, `C` cleared.
pub fn cmpz(st: &mut StatusWord, val: u32) {
    st.set_zero(val == 0);
    st.set_negative(val & 0x8000_0000 != 0);
    st.set_carry(false);
}

pub fn lsl(st: &mut StatusWord, dst: &mut u32, src1: u32, shift: u32) {
    let wide = (src1 as u64) << (shift & 0x1f);
    *dst = wide as u32;
    set_flags_from_wide(st, wide);
}

pub fn lsr(st: &mut StatusWord, dst: &mut u32, src1: u32, shift: u32) {
    let r = src1 >> (shift & 0x1f);
    *dst = r;
    set_flags_from_wide(st, r as u64);
}

pub fn asl(st: &mut StatusWord, dst: &mut u32, src1: u32, shift: u32) {
    lsl(st, dst, src1, shift);
}

pub fn asr(st: &mut StatusWord, dst: &mut u32, src1: u32, shift: u32) {
    let r = ((src1 as i32) >> (shift & 0x1f)) as u32;
    *dst = r;
    set_flags_from_wide(st, r as u64);
}
