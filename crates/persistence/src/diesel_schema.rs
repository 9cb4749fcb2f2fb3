// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    admins (admin_id) {
        admin_id -> BigInt,
        email -> Text,
        password_hash -> Text,
        role -> Text,
        created_at -> Text,
        last_login_at -> Nullable<Text>,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        admin_id -> BigInt,
        created_at -> Text,
        last_activity_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    drivers (driver_id) {
        driver_id -> BigInt,
        name -> Text,
        phone -> Text,
        email -> Nullable<Text>,
        license_no -> Nullable<Text>,
        address -> Nullable<Text>,
        national_id -> Nullable<Text>,
        status -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    ambulances (ambulance_id) {
        ambulance_id -> BigInt,
        model_name -> Text,
        vehicle_type -> Text,
        vehicle_no -> Text,
        equipment_details -> Nullable<Text>,
        status -> Text,
        current_latitude -> Nullable<Double>,
        current_longitude -> Nullable<Double>,
        last_location_update -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    ambulance_locations (location_id) {
        location_id -> BigInt,
        ambulance_id -> BigInt,
        latitude -> Double,
        longitude -> Double,
        speed -> Nullable<Double>,
        heading -> Nullable<Double>,
        accuracy -> Nullable<Double>,
        recorded_at -> Text,
    }
}

diesel::table! {
    assignments (assignment_id) {
        assignment_id -> BigInt,
        duty_date -> Text,
        shift -> Text,
        driver_id -> BigInt,
        ambulance_id -> BigInt,
        notes -> Nullable<Text>,
        status -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    bookings (booking_id) {
        booking_id -> BigInt,
        patient_name -> Text,
        phone -> Text,
        phone_verified -> Integer,
        from_address -> Text,
        from_latitude -> Nullable<Double>,
        from_longitude -> Nullable<Double>,
        to_address -> Text,
        to_latitude -> Nullable<Double>,
        to_longitude -> Nullable<Double>,
        from_date -> Text,
        to_date -> Nullable<Text>,
        pickup_time -> Text,
        notes -> Nullable<Text>,
        status -> Text,
        assigned_ambulance_id -> Nullable<BigInt>,
        assigned_driver_id -> Nullable<BigInt>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    booking_events (event_id) {
        event_id -> BigInt,
        booking_id -> BigInt,
        event_type -> Text,
        payload_json -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    otp_verifications (phone) {
        phone -> Text,
        code -> Text,
        expires_at -> Text,
        verified -> Integer,
        updated_at -> Text,
    }
}

diesel::table! {
    expenses (expense_id) {
        expense_id -> BigInt,
        title -> Text,
        description -> Nullable<Text>,
        category -> Text,
        amount -> Double,
        currency -> Text,
        expense_date -> Text,
        vendor -> Nullable<Text>,
        receipt_url -> Nullable<Text>,
        status -> Text,
        created_by -> BigInt,
        approved_by -> Nullable<BigInt>,
        approved_at -> Nullable<Text>,
        created_at -> Text,
    }
}
