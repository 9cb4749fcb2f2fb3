// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

pub mod admins;
pub mod ambulances;
pub mod assignments;
pub mod bookings;
pub mod drivers;
pub mod expenses;
pub mod otp;
