// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod insights;
pub mod planner;
pub mod profile;
pub mod reports;
pub mod transactions;
