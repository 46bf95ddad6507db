// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

mod golden;
mod smart;
mod tables;
