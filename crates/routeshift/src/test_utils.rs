use serde_json::{Value, json};

use crate::json::{input::JsonRoutePlanInput, output::JsonRoutePlanOutput};

pub fn input_value() -> Value {
    json!({
        "vehicles": [
            {
                "id": "V1",
                "vehicleType": "VAN",
                "shifts": [
                    {
                        "id": "V1-S1",
                        "startLocation": [50.0, 4.0],
                        "endLocation": [50.5, 4.5],
                        "minStartTime": "2027-02-01T08:00:00Z",
                        "maxEndTime": "2027-02-01T17:00:00Z",
                        "skills": [{ "name": "electrician", "level": 2 }],
                        "requiredBreaks": [
                            {
                                "id": "V1-S1-B1",
                                "type": "FIXED",
                                "location": [50.2, 4.2],
                            },
                            { "id": "V1-S1-B2", "type": "FLOATING" },
                        ],
                    },
                    {
                        "id": "V1-S2",
                        "startLocation": [50.0, 4.0],
                        "minStartTime": "2027-02-02T08:00:00Z",
                        "maxEndTime": "2027-02-02T17:00:00Z",
                    },
                ],
            },
            {
                "id": "V2",
                "shifts": [
                    {
                        "id": "V2-S1",
                        "startLocation": [51.0, 5.0],
                        "endLocation": [51.0, 5.0],
                        "requiredBreaks": [
                            {
                                "id": "V2-S1-B1",
                                "type": "FLOATING",
                                "location": [51.1, 5.1],
                            },
                        ],
                        "itinerary": [{ "id": "C", "kind": "VISIT" }],
                    },
                ],
            },
        ],
        "visits": [
            { "id": "A", "location": [50.1, 4.1], "serviceDuration": "PT30M" },
            { "id": "B", "location": [50.3, 4.3], "requiredVehicles": ["V1"] },
            { "id": "C", "location": [51.2, 5.2] },
            { "id": "D", "location": [51.3, 5.3], "requiredVehicles": ["V3"] },
            { "id": "E", "location": [50.4, 4.4], "requiredVehicles": ["V1", "V3"] },
        ],
        "visitGroups": [
            {
                "id": "G1",
                "visits": [
                    { "id": "F", "location": [50.6, 4.6], "requiredVehicles": ["V4"] },
                    { "id": "G", "location": [50.7, 4.7] },
                ],
            },
        ],
    })
}

pub fn input_fixture() -> JsonRoutePlanInput {
    serde_json::from_value(input_value()).unwrap()
}

pub fn output_fixture() -> JsonRoutePlanOutput {
    serde_json::from_value(json!({
        "metadata": { "id": "run-1", "name": "Monday" },
        "modelOutput": {
            "vehicles": [
                {
                    "id": "V1",
                    "shifts": [
                        {
                            "id": "V1-S1",
                            "startTime": "2027-02-01T08:00:00Z",
                            "itinerary": [
                                { "id": "A", "kind": "VISIT", "arrivalTime": "2027-02-01T08:20:00Z" },
                                { "id": "V1-S1-B1", "kind": "BREAK", "startTime": "2027-02-01T12:00:00Z" },
                                { "id": "B", "kind": "VISIT", "arrivalTime": "2027-02-01T13:10:00Z" },
                            ],
                        },
                        { "id": "V1-S2", "itinerary": [] },
                    ],
                },
                {
                    "id": "V2",
                    "shifts": [
                        {
                            "id": "V2-S1",
                            "itinerary": [
                                { "id": "C", "kind": "VISIT", "arrivalTime": "2027-02-01T09:00:00Z" },
                            ],
                        },
                    ],
                },
            ],
        },
    }))
    .unwrap()
}
